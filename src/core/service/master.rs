use tracing::{error, info};
use validify::Validify;

use super::fetch_or_empty;
use crate::core::{
    model::master::{Category, CategoryInsert, Company, CompanyInsert, Rack, RackInsert},
    repo::master::MasterRepo,
};

/// Outcome banner for the last master mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    Success(String),
    Error(String),
}

/// Master data management: plain create+list for companies, racks and
/// categories. Masters have no lifecycle beyond creation.
pub struct MasterCatalog<R> {
    repo: R,
    companies: Vec<Company>,
    racks: Vec<Rack>,
    categories: Vec<Category>,
    notice: Option<Notice>,
}

impl<R> MasterCatalog<R>
where
    R: MasterRepo + Send + Sync,
{
    pub fn new(repo: R) -> Self {
        Self {
            repo,
            companies: Vec::new(),
            racks: Vec::new(),
            categories: Vec::new(),
            notice: None,
        }
    }

    /// Refresh all three master lists.
    pub async fn load(&mut self) {
        self.companies = fetch_or_empty(self.repo.list_companies().await, "companies");
        self.racks = fetch_or_empty(self.repo.list_racks().await, "racks");
        self.categories = fetch_or_empty(self.repo.list_categories().await, "categories");
    }

    pub async fn add_company(&mut self, name: &str) {
        let mut insert = CompanyInsert {
            name: name.to_string(),
        };

        if let Err(e) = insert.validify() {
            self.notice = Some(Notice::Error(e.to_string()));
            return;
        }

        match self.repo.create_company(insert).await {
            Ok(company) => {
                info!(name = %company.name, "Company added");
                self.notice = Some(Notice::Success("Company added successfully!".to_string()));
                self.companies = fetch_or_empty(self.repo.list_companies().await, "companies");
            }
            Err(e) => {
                error!("Failed to add company; {e}");
                self.notice = Some(Notice::Error("Failed to add company.".to_string()));
            }
        }
    }

    pub async fn add_rack(&mut self, code: &str) {
        let mut insert = RackInsert {
            code: code.to_string(),
        };

        if let Err(e) = insert.validify() {
            self.notice = Some(Notice::Error(e.to_string()));
            return;
        }

        match self.repo.create_rack(insert).await {
            Ok(rack) => {
                info!(code = %rack.code, "Rack added");
                self.notice = Some(Notice::Success("Rack added successfully!".to_string()));
                self.racks = fetch_or_empty(self.repo.list_racks().await, "racks");
            }
            Err(e) => {
                error!("Failed to add rack; {e}");
                self.notice = Some(Notice::Error("Failed to add rack.".to_string()));
            }
        }
    }

    pub async fn add_category(&mut self, name: &str, code: &str) {
        let mut insert = CategoryInsert {
            name: name.to_string(),
            code: code.to_string(),
        };

        if let Err(e) = insert.validify() {
            self.notice = Some(Notice::Error(e.to_string()));
            return;
        }

        match self.repo.create_category(insert).await {
            Ok(category) => {
                info!(code = %category.code, "Category added");
                self.notice = Some(Notice::Success("Category added successfully!".to_string()));
                self.categories = fetch_or_empty(self.repo.list_categories().await, "categories");
            }
            Err(e) => {
                error!("Failed to add category; {e}");
                self.notice = Some(Notice::Error("Failed to add category.".to_string()));
            }
        }
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

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }
}
