use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    core::{
        model::{
            file::FileRef,
            movement::{Movement, MovementInsert},
        },
        repo::movement::MovementRepo,
    },
    error::FiletrailError,
};

/// Flattened join of a movement with its owning file.
#[derive(FromRow)]
struct MovementRow {
    id: Uuid,
    file_id: Uuid,
    file_reference_code: String,
    file_name: String,
    handed_over_to: String,
    purpose: String,
    transfer_date: NaiveDate,
    expected_return_date: NaiveDate,
    actual_return_date: Option<NaiveDate>,
    status: String,
}

impl TryFrom<MovementRow> for Movement {
    type Error = FiletrailError;

    fn try_from(row: MovementRow) -> Result<Self, Self::Error> {
        Ok(Movement {
            id: row.id,
            file: FileRef {
                id: row.file_id,
                reference_code: row.file_reference_code,
                name: row.file_name,
            },
            handed_over_to: row.handed_over_to,
            purpose: row.purpose,
            transfer_date: row.transfer_date,
            expected_return_date: row.expected_return_date,
            actual_return_date: row.actual_return_date,
            status: row.status.as_str().try_into()?,
        })
    }
}

const MOVEMENT_SELECT: &str = r#"
    SELECT m.id, m.handed_over_to, m.purpose, m.transfer_date,
           m.expected_return_date, m.actual_return_date, m.status,
           f.id AS file_id, f.reference_code AS file_reference_code,
           f.name AS file_name
    FROM movements m
    JOIN files f ON f.id = m.file_id
"#;

#[async_trait::async_trait]
impl MovementRepo for PgPool {
    async fn list_movements(&self) -> Result<Vec<Movement>, FiletrailError> {
        let rows = sqlx::query_as::<_, MovementRow>(&format!(
            "{MOVEMENT_SELECT} ORDER BY m.created_at"
        ))
        .fetch_all(self)
        .await?;

        rows.into_iter().map(Movement::try_from).collect()
    }

    async fn create_movement(
        &self,
        movement: MovementInsert,
    ) -> Result<Movement, FiletrailError> {
        let (id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO movements
                 (file_id, handed_over_to, purpose, transfer_date, expected_return_date)
             VALUES ($1, $2, $3, $4, $5)
             RETURNING id",
        )
        .bind(movement.file_id)
        .bind(&movement.handed_over_to)
        .bind(&movement.purpose)
        .bind(movement.transfer_date)
        .bind(movement.expected_return_date)
        .fetch_one(self)
        .await?;

        get_movement(self, id).await
    }

    async fn return_movement(
        &self,
        id: Uuid,
        date: NaiveDate,
    ) -> Result<Movement, FiletrailError> {
        let updated = sqlx::query(
            "UPDATE movements
             SET status = 'Received', actual_return_date = $2
             WHERE id = $1 AND status = 'Moved'",
        )
        .bind(id)
        .bind(date)
        .execute(self)
        .await?
        .rows_affected();

        if updated == 0 {
            return Err(FiletrailError::DoesNotExist(format!(
                "Movement with ID '{id}' eligible for return"
            )));
        }

        get_movement(self, id).await
    }
}

async fn get_movement(pool: &PgPool, id: Uuid) -> Result<Movement, FiletrailError> {
    sqlx::query_as::<_, MovementRow>(&format!("{MOVEMENT_SELECT} WHERE m.id = $1"))
        .bind(id)
        .fetch_one(pool)
        .await?
        .try_into()
}
