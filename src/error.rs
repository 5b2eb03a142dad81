use thiserror::Error;
use validify::ValidationErrors;

#[derive(Debug, Error)]
pub enum FiletrailError {
    #[error("Does not exist; {0}")]
    DoesNotExist(String),

    #[error("Required; {0}")]
    Required(String),

    #[error("Please select a file first.")]
    SelectionMissing,

    #[error("Invalid movement status; {0}")]
    InvalidStatus(String),

    #[error("Validation; {0}")]
    Validation(#[from] ValidationErrors),

    #[error("SQL; {0}")]
    Sqlx(#[from] sqlx::Error),

    #[error("IO; {0}")]
    IO(#[from] std::io::Error),

    #[error("Parse date; {0}")]
    ParseDate(#[from] chrono::ParseError),

    #[error("JSON error; {0}")]
    SerdeJson(#[from] serde_json::Error),
}
