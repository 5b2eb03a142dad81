#[cfg(test)]
#[suitest::suite(movement_workflow_tests)]
#[suitest::suite_cfg(sequential = true)]
mod movement_workflow_tests {
    use std::sync::atomic::Ordering;

    use chrono::NaiveDate;
    use suitest::before_all;

    use crate::{
        app::test::{date, seed_file, seed_masters, MemoryRepo},
        core::{
            model::{
                file::{File, FileRef},
                movement::{Custody, Movement, MovementInsert, MovementStatus},
            },
            repo::movement::MovementRepo,
            service::movement::MovementDesk,
        },
    };

    #[before_all]
    async fn setup() -> MemoryRepo {
        let repo = MemoryRepo::default();
        repo
    }

    async fn desk(repo: &MemoryRepo) -> MovementDesk<MemoryRepo> {
        let mut desk = MovementDesk::new(repo.clone(), date("2025-01-03"));
        desk.refresh().await;
        desk
    }

    async fn acme_file(repo: &MemoryRepo, name: &str) -> File {
        let (company, rack, category) =
            seed_masters(repo, "Acme Corp", "R01", ("GEN", "General")).await;
        seed_file(repo, name, (&company, &rack, &category)).await
    }

    async fn hand_over(
        repo: &MemoryRepo,
        file: &File,
        recipient: &str,
        transfer_date: NaiveDate,
    ) -> Movement {
        repo.create_movement(MovementInsert {
            file_id: file.id,
            handed_over_to: recipient.to_string(),
            purpose: "Quarterly audit".to_string(),
            transfer_date,
            expected_return_date: date("2025-02-01"),
        })
        .await
        .unwrap()
    }

    #[test]
    async fn submit_without_a_selection_is_rejected_locally(repo: MemoryRepo) {
        let mut desk = desk(&repo).await;

        desk.form.handed_over_to = "John Doe".to_string();
        desk.form.purpose = "Quarterly audit".to_string();
        desk.form.expected_return_date = Some(date("2025-02-01"));

        let before = repo.total_calls();
        desk.submit(date("2025-01-03")).await;

        assert_eq!(Some("Please select a file first."), desk.error());
        assert_eq!(before, repo.total_calls());
    }

    #[test]
    async fn missing_expected_return_date_is_rejected_locally(repo: MemoryRepo) {
        let file = acme_file(&repo, "Supplier Contracts").await;
        let mut desk = desk(&repo).await;

        desk.select_file(FileRef::from(&file));
        desk.form.handed_over_to = "John Doe".to_string();
        desk.form.purpose = "Quarterly audit".to_string();

        let before = repo.total_calls();
        desk.submit(date("2025-01-03")).await;

        assert!(desk.error().is_some());
        assert_eq!(before, repo.total_calls());
    }

    #[test]
    async fn recording_a_movement_resets_the_form_and_selection(repo: MemoryRepo) {
        let file = acme_file(&repo, "Supplier Contracts").await;
        let mut desk = desk(&repo).await;
        let today = date("2025-01-03");

        desk.select_file(FileRef::from(&file));
        desk.form.handed_over_to = "John Doe".to_string();
        desk.form.purpose = "Quarterly audit".to_string();
        desk.form.expected_return_date = Some(date("2025-02-01"));

        desk.submit(today).await;

        assert!(desk.error().is_none());

        let recorded: Vec<_> = desk
            .movements()
            .iter()
            .filter(|m| m.file.id == file.id)
            .collect();
        assert_eq!(1, recorded.len());
        assert_eq!(MovementStatus::Moved, recorded[0].status);
        assert_eq!("John Doe", recorded[0].handed_over_to);
        assert_eq!("-", recorded[0].actual_return_display());

        assert_eq!("", desk.form.handed_over_to);
        assert_eq!(None, desk.form.expected_return_date);
        assert_eq!(today, desk.form.transfer_date);
        assert!(desk.search.selected().is_none());
        assert_eq!("", desk.search.query());
    }

    #[test]
    async fn failed_create_keeps_the_form_and_reports(repo: MemoryRepo) {
        let file = acme_file(&repo, "Supplier Contracts").await;
        let mut desk = desk(&repo).await;

        desk.select_file(FileRef::from(&file));
        desk.form.handed_over_to = "John Doe".to_string();
        desk.form.purpose = "Quarterly audit".to_string();
        desk.form.expected_return_date = Some(date("2025-02-01"));

        repo.fail_writes.store(true, Ordering::SeqCst);
        desk.submit(date("2025-01-03")).await;
        repo.fail_writes.store(false, Ordering::SeqCst);

        assert_eq!(Some("Failed to record movement."), desk.error());
        assert_eq!("John Doe", desk.form.handed_over_to);
        assert!(desk.search.selected().is_some());
    }

    #[test]
    async fn mark_received_flips_exactly_once(repo: MemoryRepo) {
        let file = acme_file(&repo, "Supplier Contracts").await;
        let movement = hand_over(&repo, &file, "John Doe", date("2025-01-03")).await;
        let mut desk = desk(&repo).await;

        let shown = desk
            .movements()
            .iter()
            .find(|m| m.id == movement.id)
            .cloned()
            .unwrap();
        assert!(desk.can_receive(&shown));

        desk.mark_received(movement.id, date("2025-01-05")).await;

        let updated = desk
            .movements()
            .iter()
            .find(|m| m.id == movement.id)
            .cloned()
            .unwrap();
        assert_eq!(MovementStatus::Received, updated.status);
        assert_eq!(Some(date("2025-01-05")), updated.actual_return_date);
        assert!(!desk.can_receive(&updated));

        // Already received; the first return date stands.
        desk.mark_received(movement.id, date("2025-01-07")).await;

        let unchanged = desk
            .movements()
            .iter()
            .find(|m| m.id == movement.id)
            .cloned()
            .unwrap();
        assert_eq!(Some(date("2025-01-05")), unchanged.actual_return_date);
    }

    #[test]
    async fn history_filter_is_case_insensitive(repo: MemoryRepo) {
        let file = acme_file(&repo, "Supplier Contracts").await;
        let movement = hand_over(&repo, &file, "John Doe", date("2025-01-03")).await;
        let mut desk = desk(&repo).await;

        let shows = |desk: &MovementDesk<MemoryRepo>| {
            desk.history().iter().any(|m| m.id == movement.id)
        };

        desk.set_filter("acm");
        assert!(shows(&desk));

        desk.set_filter("ACM");
        assert!(shows(&desk));

        desk.set_filter("supplier CONTRACTS");
        assert!(shows(&desk));

        desk.set_filter("john d");
        assert!(shows(&desk));

        desk.set_filter("no such needle");
        assert!(!shows(&desk));
    }

    #[test]
    async fn history_is_newest_first(repo: MemoryRepo) {
        let file = acme_file(&repo, "Board Minutes").await;
        let first = hand_over(&repo, &file, "John Doe", date("2025-01-03")).await;
        let second = hand_over(&repo, &file, "Jane Roe", date("2025-01-10")).await;
        let mut desk = desk(&repo).await;

        desk.set_filter("board minutes");
        let history = desk.history();

        assert_eq!(2, history.len());
        assert_eq!(second.id, history[0].id);
        assert_eq!(first.id, history[1].id);
    }

    #[test]
    async fn custody_follows_the_latest_movement(repo: MemoryRepo) {
        let file = acme_file(&repo, "Supplier Contracts").await;
        let mut desk = desk(&repo).await;

        assert_eq!(Custody::OnFile, desk.custody_of(file.id));

        let movement = hand_over(&repo, &file, "John Doe", date("2025-01-03")).await;
        desk.refresh().await;
        assert_eq!(Custody::InCustody, desk.custody_of(file.id));

        repo.return_movement(movement.id, date("2025-01-05"))
            .await
            .unwrap();
        desk.refresh().await;
        assert_eq!(Custody::OnFile, desk.custody_of(file.id));
    }
}
