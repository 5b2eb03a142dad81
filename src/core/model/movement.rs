use chrono::NaiveDate;
use serde::Serialize;
use uuid::Uuid;
use validify::Validify;

use super::file::FileRef;
use crate::error::FiletrailError;

/// Main model for the `movements` table. A movement is a custody transfer of
/// a file to a named recipient within a time window.
///
/// Created as [MovementStatus::Moved] with no actual return date; flips to
/// [MovementStatus::Received] exactly once and never back.
#[derive(Debug, Clone, Serialize)]
pub struct Movement {
    /// Primary key.
    pub id: Uuid,

    /// Owning file, embedded for display.
    pub file: FileRef,

    /// Free-text recipient.
    pub handed_over_to: String,

    pub purpose: String,

    pub transfer_date: NaiveDate,

    pub expected_return_date: NaiveDate,

    /// Present if and only if the status is [MovementStatus::Received].
    pub actual_return_date: Option<NaiveDate>,

    pub status: MovementStatus,
}

impl Movement {
    /// Rendering for the actual return column; movements still out show `-`.
    pub fn actual_return_display(&self) -> String {
        match self.actual_return_date {
            Some(date) => date.to_string(),
            None => "-".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum MovementStatus {
    Moved,
    Received,
}

impl std::fmt::Display for MovementStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MovementStatus::Moved => write!(f, "Moved"),
            MovementStatus::Received => write!(f, "Received"),
        }
    }
}

impl TryFrom<&str> for MovementStatus {
    type Error = FiletrailError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "Moved" => Ok(Self::Moved),
            "Received" => Ok(Self::Received),
            _ => Err(FiletrailError::InvalidStatus(value.to_owned())),
        }
    }
}

/// Custody state of a file, derived from its movements and never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Custody {
    /// No movement out, or the last one came back.
    OnFile,

    /// The most recent movement has not been received back.
    InCustody,
}

/// Derive the custody state from a file's movements, given in creation
/// order. A file with no movements is on file.
pub fn custody<'a, I>(movements: I) -> Custody
where
    I: IntoIterator<Item = &'a Movement>,
{
    match movements.into_iter().last() {
        Some(movement) if movement.status == MovementStatus::Moved => Custody::InCustody,
        _ => Custody::OnFile,
    }
}

/// DTO for inserting.
#[derive(Debug, Clone, Validify)]
pub struct MovementInsert {
    pub file_id: Uuid,

    #[modify(trim)]
    #[validate(length(min = 1, message = "Recipient cannot be empty."))]
    pub handed_over_to: String,

    #[modify(trim)]
    #[validate(length(min = 1, message = "Purpose cannot be empty."))]
    pub purpose: String,

    pub transfer_date: NaiveDate,

    pub expected_return_date: NaiveDate,
}
