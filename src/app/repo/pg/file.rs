use chrono::NaiveDate;
use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    app::repo::reference_code,
    core::{
        model::{
            file::{File, FileInsert, FileRef},
            master::{Category, Company, Rack},
        },
        repo::file::FileRepo,
    },
    error::FiletrailError,
};

/// Flattened join of a file with its masters.
#[derive(FromRow)]
struct FileRow {
    id: Uuid,
    name: String,
    creation_date: NaiveDate,
    creator_name: String,
    reference_code: String,
    company_id: Uuid,
    company_name: String,
    rack_id: Uuid,
    rack_code: String,
    category_id: Uuid,
    category_name: String,
    category_code: String,
}

impl From<FileRow> for File {
    fn from(row: FileRow) -> Self {
        File {
            id: row.id,
            name: row.name,
            creation_date: row.creation_date,
            creator_name: row.creator_name,
            reference_code: row.reference_code,
            company: Company {
                id: row.company_id,
                name: row.company_name,
            },
            rack: Rack {
                id: row.rack_id,
                code: row.rack_code,
            },
            category: Category {
                id: row.category_id,
                name: row.category_name,
                code: row.category_code,
            },
        }
    }
}

#[derive(FromRow)]
struct FileRefRow {
    id: Uuid,
    reference_code: String,
    name: String,
}

impl From<FileRefRow> for FileRef {
    fn from(row: FileRefRow) -> Self {
        FileRef {
            id: row.id,
            reference_code: row.reference_code,
            name: row.name,
        }
    }
}

#[derive(FromRow)]
struct CodeParts {
    company_name: String,
    rack_code: String,
    category_code: String,
}

const FILE_SELECT: &str = r#"
    SELECT f.id, f.name, f.creation_date, f.creator_name, f.reference_code,
           c.id AS company_id, c.name AS company_name,
           r.id AS rack_id, r.code AS rack_code,
           g.id AS category_id, g.name AS category_name, g.code AS category_code
    FROM files f
    JOIN companies c ON c.id = f.company_id
    JOIN racks r ON r.id = f.rack_id
    JOIN categories g ON g.id = f.category_id
"#;

#[async_trait::async_trait]
impl FileRepo for PgPool {
    async fn search_files(&self, query: &str) -> Result<Vec<FileRef>, FiletrailError> {
        let rows = sqlx::query_as::<_, FileRefRow>(
            "SELECT id, reference_code, name FROM files
             WHERE name ILIKE $1 OR reference_code ILIKE $1
             ORDER BY created_at",
        )
        .bind(format!("%{query}%"))
        .fetch_all(self)
        .await?;

        Ok(rows.into_iter().map(FileRef::from).collect())
    }

    async fn list_files(&self) -> Result<Vec<File>, FiletrailError> {
        let rows =
            sqlx::query_as::<_, FileRow>(&format!("{FILE_SELECT} ORDER BY f.created_at"))
                .fetch_all(self)
                .await?;

        Ok(rows.into_iter().map(File::from).collect())
    }

    async fn create_file(&self, file: FileInsert) -> Result<File, FiletrailError> {
        // The reference code derives from the masters plus a per-combination
        // sequence, so resolve those first.
        let Some(parts) = sqlx::query_as::<_, CodeParts>(
            "SELECT c.name AS company_name, r.code AS rack_code, g.code AS category_code
             FROM companies c, racks r, categories g
             WHERE c.id = $1 AND r.id = $2 AND g.id = $3",
        )
        .bind(file.company_id)
        .bind(file.rack_id)
        .bind(file.category_id)
        .fetch_optional(self)
        .await?
        else {
            return Err(FiletrailError::DoesNotExist(
                "Company, rack or category for the new file".to_string(),
            ));
        };

        // Codes are never reissued. The next sequence comes from the highest
        // suffix ever assigned for the combination, not the row count;
        // deletions leave gaps.
        let (seq,): (i64,) = sqlx::query_as(
            "SELECT COALESCE(MAX(SUBSTRING(reference_code FROM '[0-9]+$')::BIGINT), 0)
             FROM files
             WHERE company_id = $1 AND rack_id = $2 AND category_id = $3",
        )
        .bind(file.company_id)
        .bind(file.rack_id)
        .bind(file.category_id)
        .fetch_one(self)
        .await?;

        let code = reference_code(
            &parts.company_name,
            &parts.rack_code,
            &parts.category_code,
            seq + 1,
        );

        let (id,): (Uuid,) = sqlx::query_as(
            "INSERT INTO files
                 (name, creation_date, creator_name, reference_code,
                  company_id, rack_id, category_id)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING id",
        )
        .bind(&file.name)
        .bind(file.creation_date)
        .bind(&file.creator_name)
        .bind(&code)
        .bind(file.company_id)
        .bind(file.rack_id)
        .bind(file.category_id)
        .fetch_one(self)
        .await?;

        let row = sqlx::query_as::<_, FileRow>(&format!("{FILE_SELECT} WHERE f.id = $1"))
            .bind(id)
            .fetch_one(self)
            .await?;

        Ok(row.into())
    }

    async fn delete_file(&self, id: Uuid) -> Result<u64, FiletrailError> {
        Ok(sqlx::query("DELETE FROM files WHERE id = $1")
            .bind(id)
            .execute(self)
            .await?
            .rows_affected())
    }
}
