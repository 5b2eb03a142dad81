use sqlx::{FromRow, PgPool};
use uuid::Uuid;

use crate::{
    core::{
        model::master::{
            Category, CategoryInsert, Company, CompanyInsert, Rack, RackInsert,
        },
        repo::master::MasterRepo,
    },
    error::FiletrailError,
};

#[derive(FromRow)]
struct CompanyRow {
    id: Uuid,
    name: String,
}

#[derive(FromRow)]
struct RackRow {
    id: Uuid,
    code: String,
}

#[derive(FromRow)]
struct CategoryRow {
    id: Uuid,
    name: String,
    code: String,
}

#[async_trait::async_trait]
impl MasterRepo for PgPool {
    async fn list_companies(&self) -> Result<Vec<Company>, FiletrailError> {
        let rows =
            sqlx::query_as::<_, CompanyRow>("SELECT id, name FROM companies ORDER BY name")
                .fetch_all(self)
                .await?;

        Ok(rows
            .into_iter()
            .map(|row| Company {
                id: row.id,
                name: row.name,
            })
            .collect())
    }

    async fn list_racks(&self) -> Result<Vec<Rack>, FiletrailError> {
        let rows = sqlx::query_as::<_, RackRow>("SELECT id, code FROM racks ORDER BY code")
            .fetch_all(self)
            .await?;

        Ok(rows
            .into_iter()
            .map(|row| Rack {
                id: row.id,
                code: row.code,
            })
            .collect())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, FiletrailError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, code FROM categories ORDER BY name",
        )
        .fetch_all(self)
        .await?;

        Ok(rows
            .into_iter()
            .map(|row| Category {
                id: row.id,
                name: row.name,
                code: row.code,
            })
            .collect())
    }

    async fn create_company(&self, company: CompanyInsert) -> Result<Company, FiletrailError> {
        let row = sqlx::query_as::<_, CompanyRow>(
            "INSERT INTO companies (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&company.name)
        .fetch_one(self)
        .await?;

        Ok(Company {
            id: row.id,
            name: row.name,
        })
    }

    async fn create_rack(&self, rack: RackInsert) -> Result<Rack, FiletrailError> {
        let row = sqlx::query_as::<_, RackRow>(
            "INSERT INTO racks (code) VALUES ($1) RETURNING id, code",
        )
        .bind(&rack.code)
        .fetch_one(self)
        .await?;

        Ok(Rack {
            id: row.id,
            code: row.code,
        })
    }

    async fn create_category(
        &self,
        category: CategoryInsert,
    ) -> Result<Category, FiletrailError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "INSERT INTO categories (name, code) VALUES ($1, $2) RETURNING id, name, code",
        )
        .bind(&category.name)
        .bind(&category.code)
        .fetch_one(self)
        .await?;

        Ok(Category {
            id: row.id,
            name: row.name,
            code: row.code,
        })
    }
}
