use std::collections::HashSet;

use chrono::NaiveDate;
use tracing::{error, info};
use uuid::Uuid;
use validify::Validify;

use super::{fetch_or_empty, search::FileSearch};
use crate::{
    core::{
        model::{
            file::FileRef,
            movement::{custody, Custody, Movement, MovementInsert, MovementStatus},
        },
        repo::{file::FileRepo, movement::MovementRepo},
    },
    error::FiletrailError,
};

/// In-progress movement form.
#[derive(Debug, Clone)]
pub struct MovementForm {
    pub handed_over_to: String,
    pub transfer_date: NaiveDate,
    pub expected_return_date: Option<NaiveDate>,
    pub purpose: String,
}

impl MovementForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            handed_over_to: String::new(),
            transfer_date: today,
            expected_return_date: None,
            purpose: String::new(),
        }
    }
}

/// Custody movement workflow.
///
/// Composes the search selector with the movement form, renders movement
/// history and performs the terminal "return" transition.
pub struct MovementDesk<R> {
    repo: R,
    pub search: FileSearch<R>,
    pub form: MovementForm,
    movements: Vec<Movement>,
    filter: String,
    error: Option<String>,
    submitting: bool,
    /// Movements whose return is in flight. Inserted synchronously on
    /// invocation so the affordance disappears before the refresh lands.
    pending_returns: HashSet<Uuid>,
}

impl<R> MovementDesk<R>
where
    R: FileRepo + MovementRepo + Clone + Send + Sync,
{
    pub fn new(repo: R, today: NaiveDate) -> Self {
        Self {
            search: FileSearch::new(repo.clone()).with_placeholder("Search by name or code..."),
            repo,
            form: MovementForm::new(today),
            movements: Vec::new(),
            filter: String::new(),
            error: None,
            submitting: false,
            pending_returns: HashSet::new(),
        }
    }

    /// Refresh the movement list mirror.
    pub async fn refresh(&mut self) {
        self.movements = fetch_or_empty(self.repo.list_movements().await, "movements");
    }

    /// Adopt a selection from the search dropdown.
    pub fn select_file(&mut self, hit: FileRef) {
        self.search.select(hit);
        self.error = None;
    }

    /// Submit the movement form for the currently selected file. Without a
    /// selection this is rejected locally and no store call is made.
    pub async fn submit(&mut self, today: NaiveDate) {
        if self.submitting {
            return;
        }

        let Some(file) = self.search.selected().cloned() else {
            self.error = Some(FiletrailError::SelectionMissing.to_string());
            return;
        };

        let insert = match self.payload(file.id) {
            Ok(insert) => insert,
            Err(e) => {
                self.error = Some(e.to_string());
                return;
            }
        };

        self.submitting = true;

        match self.repo.create_movement(insert).await {
            Ok(_) => {
                info!(file = %file.reference_code, "Movement recorded");
                self.form = MovementForm::new(today);
                self.search.reset();
                self.error = None;
                self.refresh().await;
            }
            Err(e) => {
                error!("Failed to record movement; {e}");
                self.error = Some("Failed to record movement.".to_string());
            }
        }

        self.submitting = false;
    }

    /// Whether the "mark received" affordance is shown for a movement.
    /// Hidden once the status flips and from the moment a return is invoked
    /// until its refresh lands, so a double press cannot fire twice.
    pub fn can_receive(&self, movement: &Movement) -> bool {
        movement.status == MovementStatus::Moved && !self.pending_returns.contains(&movement.id)
    }

    /// Mark a movement as received on `date`. Issues a single update and
    /// refreshes the list on completion, success or not.
    pub async fn mark_received(&mut self, id: Uuid, date: NaiveDate) {
        if !self.pending_returns.insert(id) {
            return;
        }

        if let Err(e) = self.repo.return_movement(id, date).await {
            error!("Failed to update status; {e}");
        }

        self.refresh().await;
        self.pending_returns.remove(&id);
    }

    pub fn set_filter(&mut self, filter: &str) {
        self.filter = filter.to_string();
    }

    /// Movement history for display: narrowed by the case-insensitive view
    /// filter (file name, reference code or recipient) and ordered
    /// most-recently-created first. Never re-queries the store.
    pub fn history(&self) -> Vec<&Movement> {
        let needle = self.filter.to_lowercase();

        self.movements
            .iter()
            .filter(|m| {
                needle.is_empty()
                    || m.file.name.to_lowercase().contains(&needle)
                    || m.file.reference_code.to_lowercase().contains(&needle)
                    || m.handed_over_to.to_lowercase().contains(&needle)
            })
            .rev()
            .collect()
    }

    /// Derived custody state for a file: in custody when its most recent
    /// movement is still out, on file otherwise.
    pub fn custody_of(&self, file_id: Uuid) -> Custody {
        custody(self.movements.iter().filter(|m| m.file.id == file_id))
    }

    fn payload(&self, file_id: Uuid) -> Result<MovementInsert, FiletrailError> {
        let Some(expected_return_date) = self.form.expected_return_date else {
            return Err(FiletrailError::Required("expected return date".to_string()));
        };

        let mut insert = MovementInsert {
            file_id,
            handed_over_to: self.form.handed_over_to.clone(),
            purpose: self.form.purpose.clone(),
            transfer_date: self.form.transfer_date,
            expected_return_date,
        };
        insert.validify()?;

        Ok(insert)
    }

    pub fn movements(&self) -> &[Movement] {
        &self.movements
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_submitting(&self) -> bool {
        self.submitting
    }
}
