use chrono::NaiveDate;
use tracing::{error, info};
use uuid::Uuid;
use validify::Validify;

use super::fetch_or_empty;
use crate::{
    core::{
        model::{
            file::{File, FileInsert},
            master::{Category, Company, Rack},
        },
        repo::{file::FileRepo, master::MasterRepo},
    },
    error::FiletrailError,
};

/// In-progress registration form. Owned by the workflow until a submit
/// succeeds; master ids stay unset until the operator picks an option.
#[derive(Debug, Clone)]
pub struct FileForm {
    pub name: String,
    pub creation_date: NaiveDate,
    pub creator_name: String,
    pub company_id: Option<Uuid>,
    pub rack_id: Option<Uuid>,
    pub category_id: Option<Uuid>,
}

impl FileForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            name: String::new(),
            creation_date: today,
            creator_name: String::new(),
            company_id: None,
            rack_id: None,
            category_id: None,
        }
    }
}

/// Per-submission state machine for the registration form. Re-enters
/// [Idle](Submission::Idle) on the next edit or submit.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Submission {
    #[default]
    Idle,
    Submitting,
    /// The server-assigned reference code of the created file.
    Success(String),
    Failed(String),
}

/// File registration workflow.
///
/// Creates files against the selected masters and displays the resulting
/// server-assigned reference code.
pub struct Registration<R> {
    repo: R,
    companies: Vec<Company>,
    racks: Vec<Rack>,
    categories: Vec<Category>,
    files: Vec<File>,
    pub form: FileForm,
    submission: Submission,
    pending_delete: Option<Uuid>,
}

impl<R> Registration<R>
where
    R: FileRepo + MasterRepo + Send + Sync,
{
    pub fn new(repo: R, today: NaiveDate) -> Self {
        Self {
            repo,
            companies: Vec::new(),
            racks: Vec::new(),
            categories: Vec::new(),
            files: Vec::new(),
            form: FileForm::new(today),
            submission: Submission::default(),
            pending_delete: None,
        }
    }

    /// Load the master option lists and the current file list.
    pub async fn load(&mut self) {
        self.refresh_masters().await;
        self.refresh_files().await;
    }

    pub async fn refresh_masters(&mut self) {
        self.companies = fetch_or_empty(self.repo.list_companies().await, "companies");
        self.racks = fetch_or_empty(self.repo.list_racks().await, "racks");
        self.categories = fetch_or_empty(self.repo.list_categories().await, "categories");
    }

    pub async fn refresh_files(&mut self) {
        self.files = fetch_or_empty(self.repo.list_files().await, "files");
    }

    /// Register an edit; any prior submission outcome is dismissed.
    pub fn edited(&mut self) {
        self.submission = Submission::Idle;
    }

    /// Submit the form. On success the server-assigned reference code is
    /// held for display and the form resets to defaults with `today` as the
    /// creation date; on failure the operator's entered values are
    /// preserved for retry. Only one submission may be in flight at a time.
    pub async fn submit(&mut self, today: NaiveDate) {
        if self.submission == Submission::Submitting {
            return;
        }

        let insert = match self.payload() {
            Ok(insert) => insert,
            Err(e) => {
                self.submission = Submission::Failed(e.to_string());
                return;
            }
        };

        self.submission = Submission::Submitting;

        match self.repo.create_file(insert).await {
            Ok(file) => {
                info!(code = %file.reference_code, "File registered");
                self.submission = Submission::Success(file.reference_code);
                self.form = FileForm::new(today);
                self.refresh_files().await;
            }
            Err(e) => {
                error!("Failed to create file; {e}");
                self.submission =
                    Submission::Failed("Failed to create file. Please check input.".to_string());
            }
        }
    }

    /// Arm deletion of a file; it takes effect only after explicit
    /// confirmation.
    pub fn request_delete(&mut self, id: Uuid) {
        self.pending_delete = Some(id);
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Perform the armed deletion. The file list is refreshed regardless of
    /// the outcome.
    pub async fn confirm_delete(&mut self) {
        let Some(id) = self.pending_delete.take() else {
            return;
        };

        if let Err(e) = self.repo.delete_file(id).await {
            error!("Failed to delete file; {e}");
        }

        self.refresh_files().await;
    }

    fn payload(&self) -> Result<FileInsert, FiletrailError> {
        let form = &self.form;

        let (Some(company_id), Some(rack_id), Some(category_id)) =
            (form.company_id, form.rack_id, form.category_id)
        else {
            return Err(FiletrailError::Required(
                "company, rack and category".to_string(),
            ));
        };

        let mut insert = FileInsert {
            name: form.name.clone(),
            creation_date: form.creation_date,
            creator_name: form.creator_name.clone(),
            company_id,
            rack_id,
            category_id,
        };
        insert.validify()?;

        Ok(insert)
    }

    pub fn companies(&self) -> &[Company] {
        &self.companies
    }

    pub fn racks(&self) -> &[Rack] {
        &self.racks
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Registered files, newest first.
    pub fn files(&self) -> impl Iterator<Item = &File> {
        self.files.iter().rev()
    }

    pub fn submission(&self) -> &Submission {
        &self.submission
    }

    pub fn pending_delete(&self) -> Option<Uuid> {
        self.pending_delete
    }
}
