use crate::{
    core::model::file::{File, FileInsert, FileRef},
    error::FiletrailError,
};
use uuid::Uuid;

/// Keeps track of registered files.
#[async_trait::async_trait]
pub trait FileRepo {
    /// Find files whose name or reference code matches `query`.
    /// The returned order is meaningful and must be preserved by callers.
    ///
    /// * `query`: Free-text query, at least 2 characters.
    async fn search_files(&self, query: &str) -> Result<Vec<FileRef>, FiletrailError>;

    /// List all files with their masters embedded, in creation order.
    async fn list_files(&self) -> Result<Vec<File>, FiletrailError>;

    /// Insert file metadata, assigning the reference code exactly once.
    ///
    /// * `file`: Insert payload.
    async fn create_file(&self, file: FileInsert) -> Result<File, FiletrailError>;

    /// Remove a file. Returns the number of removed rows.
    ///
    /// * `id`: File ID.
    async fn delete_file(&self, id: Uuid) -> Result<u64, FiletrailError>;
}
