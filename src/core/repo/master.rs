use crate::{
    core::model::master::{
        Category, CategoryInsert, Company, CompanyInsert, Rack, RackInsert,
    },
    error::FiletrailError,
};

/// Keeps the organizational masters used to classify files. Masters are
/// plain create+list reference data with no lifecycle.
#[async_trait::async_trait]
pub trait MasterRepo {
    async fn list_companies(&self) -> Result<Vec<Company>, FiletrailError>;

    async fn list_racks(&self) -> Result<Vec<Rack>, FiletrailError>;

    async fn list_categories(&self) -> Result<Vec<Category>, FiletrailError>;

    async fn create_company(&self, company: CompanyInsert) -> Result<Company, FiletrailError>;

    async fn create_rack(&self, rack: RackInsert) -> Result<Rack, FiletrailError>;

    async fn create_category(&self, category: CategoryInsert)
        -> Result<Category, FiletrailError>;
}
