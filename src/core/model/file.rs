use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;
use validify::Validify;

use super::master::{Category, Company, Rack};

/// Main model for the `files` table. A file is a tracked physical document
/// package classified against the organizational masters.
///
/// The reference code is assigned by the store exactly once at creation and
/// never regenerated.
#[derive(Debug, Clone, Serialize)]
pub struct File {
    /// Primary key.
    pub id: Uuid,

    /// Display name of the physical file.
    pub name: String,

    pub creation_date: NaiveDate,

    pub creator_name: String,

    /// Server-assigned, opaque to everything upstream.
    pub reference_code: String,

    pub company: Company,
    pub rack: Rack,
    pub category: Category,
}

/// Denormalized display shape for a file, used for search hits and for
/// embedding in movements.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileRef {
    pub id: Uuid,
    pub reference_code: String,
    pub name: String,
}

impl From<&File> for FileRef {
    fn from(file: &File) -> Self {
        Self {
            id: file.id,
            reference_code: file.reference_code.clone(),
            name: file.name.clone(),
        }
    }
}

/// DTO for inserting.
#[derive(Debug, Clone, Validify)]
pub struct FileInsert {
    #[modify(trim)]
    #[validate(length(min = 1, message = "File name cannot be empty."))]
    pub name: String,

    pub creation_date: NaiveDate,

    #[modify(trim)]
    #[validate(length(min = 1, message = "Creator name cannot be empty."))]
    pub creator_name: String,

    pub company_id: Uuid,
    pub rack_id: Uuid,
    pub category_id: Uuid,
}
