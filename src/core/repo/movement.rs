use crate::{
    core::model::movement::{Movement, MovementInsert},
    error::FiletrailError,
};
use chrono::NaiveDate;
use uuid::Uuid;

/// Keeps track of custody movements.
#[async_trait::async_trait]
pub trait MovementRepo {
    /// List all movements in creation order, with the owning file embedded.
    async fn list_movements(&self) -> Result<Vec<Movement>, FiletrailError>;

    /// Insert a movement. New movements start out as
    /// [Moved](crate::core::model::movement::MovementStatus::Moved) with no
    /// actual return date.
    ///
    /// * `movement`: Insert payload.
    async fn create_movement(&self, movement: MovementInsert)
        -> Result<Movement, FiletrailError>;

    /// Flip a movement to
    /// [Received](crate::core::model::movement::MovementStatus::Received),
    /// recording `date` as the actual return date.
    ///
    /// Fails with [FiletrailError::DoesNotExist] when the movement is missing
    /// or was already received; a movement never transitions back.
    ///
    /// * `id`: Movement ID.
    /// * `date`: The date of the return action.
    async fn return_movement(&self, id: Uuid, date: NaiveDate)
        -> Result<Movement, FiletrailError>;
}
