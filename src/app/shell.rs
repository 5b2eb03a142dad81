//! Minimal line-oriented host for the workflows. The real navigation shell
//! is an external collaborator; this drives the same services over stdin so
//! the whole lifecycle can be exercised from a terminal.

use chrono::{Local, NaiveDate};
use tokio::io::{AsyncBufReadExt, BufReader};

use super::state::AppState;
use crate::{
    config::DATE_FORMAT,
    core::service::{master::Notice, registration::Submission},
    error::FiletrailError,
};

const HELP: &str = "\
commands:
  masters                                  list companies, racks and categories
  company <name>                           add a company
  rack <code>                              add a rack
  category <code> <name..>                 add a category
  files                                    list files with custody state
  register <co#> <rack#> <cat#> <creator> <name..>
  delete <file#>                           arm deletion (then: confirm | cancel)
  search <query..>                         debounced file lookup
  pick <result#>                           select a file from the last search
  move <recipient> ; <purpose> ; <YYYY-MM-DD>
  history [filter..]                       movement history, newest first
  receive <row#>                           mark a history row as received
  export                                   dump files and movements as JSON
  quit";

pub async fn run(mut state: AppState) -> Result<(), FiletrailError> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    println!("{HELP}");

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let (cmd, rest) = match line.split_once(' ') {
            Some((cmd, rest)) => (cmd, rest.trim()),
            None => (line, ""),
        };

        match cmd {
            "quit" | "exit" => break,
            "help" => println!("{HELP}"),
            "masters" => print_masters(&state),
            "company" => {
                state.services.masters.add_company(rest).await;
                print_notice(&state);
            }
            "rack" => {
                state.services.masters.add_rack(rest).await;
                print_notice(&state);
            }
            "category" => match rest.split_once(' ') {
                Some((code, name)) => {
                    state.services.masters.add_category(name.trim(), code).await;
                    print_notice(&state);
                }
                None => println!("usage: category <code> <name..>"),
            },
            "files" => print_files(&mut state).await,
            "register" => register(&mut state, rest).await,
            "delete" => delete(&mut state, rest),
            "confirm" => {
                state.services.registration.confirm_delete().await;
                println!("done");
            }
            "cancel" => {
                state.services.registration.cancel_delete();
                println!("cancelled");
            }
            "search" => search(&mut state, rest).await,
            "pick" => pick(&mut state, rest),
            "move" => record_movement(&mut state, rest).await,
            "history" => {
                state.services.movement.set_filter(rest);
                print_history(&state);
            }
            "receive" => receive(&mut state, rest).await,
            "export" => export(&mut state).await?,
            _ => println!("unknown command; try 'help'"),
        }
    }

    Ok(())
}

fn print_notice(state: &AppState) {
    match state.services.masters.notice() {
        Some(Notice::Success(msg)) => println!("{msg}"),
        Some(Notice::Error(msg)) => println!("error: {msg}"),
        None => {}
    }
}

fn print_masters(state: &AppState) {
    let masters = &state.services.masters;

    println!("companies:");
    for (i, company) in masters.companies().iter().enumerate() {
        println!("  {}. {}", i + 1, company.name);
    }
    println!("racks:");
    for (i, rack) in masters.racks().iter().enumerate() {
        println!("  {}. {}", i + 1, rack.code);
    }
    println!("categories:");
    for (i, category) in masters.categories().iter().enumerate() {
        println!("  {}. [{}] {}", i + 1, category.code, category.name);
    }
}

async fn print_files(state: &mut AppState) {
    state.services.registration.refresh_files().await;
    state.services.movement.refresh().await;

    for (i, file) in state.services.registration.files().enumerate() {
        let custody = state.services.movement.custody_of(file.id);
        println!(
            "{}. {} | {} | {} | {} | {} | {:?}",
            i + 1,
            file.reference_code,
            file.name,
            file.company.name,
            file.rack.code,
            file.category.name,
            custody,
        );
    }
}

async fn register(state: &mut AppState, rest: &str) {
    let registration = &mut state.services.registration;
    let mut parts = rest.splitn(5, ' ');

    let (Some(co), Some(rack), Some(cat), Some(creator), Some(name)) = (
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
        parts.next(),
    ) else {
        println!("usage: register <co#> <rack#> <cat#> <creator> <name..>");
        return;
    };

    registration.edited();
    registration.form.name = name.to_string();
    registration.form.creator_name = creator.to_string();
    registration.form.company_id = pick_id(co, registration.companies().iter().map(|c| c.id));
    registration.form.rack_id = pick_id(rack, registration.racks().iter().map(|r| r.id));
    registration.form.category_id = pick_id(cat, registration.categories().iter().map(|c| c.id));

    registration.submit(Local::now().date_naive()).await;

    match registration.submission() {
        Submission::Success(code) => println!("File created; reference code {code}"),
        Submission::Failed(msg) => println!("error: {msg}"),
        _ => {}
    }
}

fn delete(state: &mut AppState, rest: &str) {
    let registration = &mut state.services.registration;

    let Some(id) = pick_id(rest, registration.files().map(|f| f.id)) else {
        println!("no such file");
        return;
    };

    registration.request_delete(id);
    println!("are you sure you want to delete this file? (confirm | cancel)");
}

async fn search(state: &mut AppState, rest: &str) {
    let search = &mut state.services.movement.search;

    match search.input(rest) {
        Some(ticket) => {
            search.run(ticket).await;
            if search.results().is_empty() {
                println!("No files found");
            }
            for (i, hit) in search.results().iter().enumerate() {
                println!("{}. {} - {}", i + 1, hit.reference_code, hit.name);
            }
        }
        None => println!("(query too short)"),
    }
}

fn pick(state: &mut AppState, rest: &str) {
    let desk = &mut state.services.movement;

    let Some(hit) = index(rest)
        .and_then(|i| desk.search.results().get(i))
        .cloned()
    else {
        println!("no such result");
        return;
    };

    desk.select_file(hit);

    if let Some(selected) = desk.search.selected() {
        println!("Selected: {}", selected.reference_code);
    }
}

async fn record_movement(state: &mut AppState, rest: &str) {
    let desk = &mut state.services.movement;
    let mut parts = rest.splitn(3, ';').map(str::trim);

    let (Some(recipient), Some(purpose), Some(expected)) =
        (parts.next(), parts.next(), parts.next())
    else {
        println!("usage: move <recipient> ; <purpose> ; <YYYY-MM-DD>");
        return;
    };

    let expected = match NaiveDate::parse_from_str(expected, DATE_FORMAT) {
        Ok(date) => date,
        Err(e) => {
            println!("error: {e}");
            return;
        }
    };

    desk.form.handed_over_to = recipient.to_string();
    desk.form.purpose = purpose.to_string();
    desk.form.expected_return_date = Some(expected);

    desk.submit(Local::now().date_naive()).await;

    match desk.error() {
        Some(msg) => println!("error: {msg}"),
        None => println!("Movement recorded"),
    }
}

fn print_history(state: &AppState) {
    let desk = &state.services.movement;

    for (i, movement) in desk.history().iter().enumerate() {
        let action = if desk.can_receive(movement) {
            " [mark received: receive]"
        } else {
            ""
        };
        println!(
            "{}. {} | {} | {} | {} | {} | {} | {}{}",
            i + 1,
            movement.file.reference_code,
            movement.file.name,
            movement.handed_over_to,
            movement.transfer_date,
            movement.expected_return_date,
            movement.actual_return_display(),
            movement.status,
            action,
        );
    }
}

async fn receive(state: &mut AppState, rest: &str) {
    let desk = &mut state.services.movement;

    let Some(id) = index(rest).and_then(|i| desk.history().get(i).map(|m| m.id)) else {
        println!("no such row");
        return;
    };

    desk.mark_received(id, Local::now().date_naive()).await;
    println!("done");
}

async fn export(state: &mut AppState) -> Result<(), FiletrailError> {
    state.services.registration.refresh_files().await;
    state.services.movement.refresh().await;

    let files: Vec<_> = state.services.registration.files().collect();
    let movements = state.services.movement.movements();

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({
            "files": files,
            "movements": movements,
        }))?
    );

    Ok(())
}

fn index(token: &str) -> Option<usize> {
    token.parse::<usize>().ok()?.checked_sub(1)
}

fn pick_id<I>(token: &str, mut ids: I) -> Option<uuid::Uuid>
where
    I: Iterator<Item = uuid::Uuid>,
{
    ids.nth(index(token)?)
}
