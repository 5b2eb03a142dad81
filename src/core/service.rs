//! Workflow services. Each service owns its transient form state and a
//! mirror of the records it last fetched; the store remains authoritative.

pub mod master;
pub mod movement;
pub mod registration;
pub mod search;

use tracing::error;

use crate::error::FiletrailError;

/// Unwrap a list read, logging and degrading to an empty result set on
/// failure. Read failures never surface to the operator.
pub(crate) fn fetch_or_empty<T>(
    result: Result<Vec<T>, FiletrailError>,
    what: &str,
) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            error!("Failed to fetch {what}; {e}");
            Vec::new()
        }
    }
}
