//! SQLite Author Repository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{AuthorRepositoryPort, RepositoryError};
use crate::domain::catalog::{Author, AuthorFields, AuthorId};

/// SQLite Author Repository
pub struct SqliteAuthorRepository {
    pool: DbPool,
}

impl SqliteAuthorRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct AuthorRow {
    id: String,
    first_name: String,
    family_name: String,
    date_of_birth: Option<String>,
    date_of_death: Option<String>,
}

fn parse_date(value: &str) -> Result<NaiveDate, RepositoryError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
}

fn date_to_string(date: Option<NaiveDate>) -> Option<String> {
    date.map(|d| d.format("%Y-%m-%d").to_string())
}

impl TryFrom<AuthorRow> for Author {
    type Error = RepositoryError;

    fn try_from(row: AuthorRow) -> Result<Self, Self::Error> {
        Ok(Author {
            id: AuthorId::from_uuid(
                Uuid::parse_str(&row.id)
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            ),
            first_name: row.first_name,
            family_name: row.family_name,
            date_of_birth: row.date_of_birth.as_deref().map(parse_date).transpose()?,
            date_of_death: row.date_of_death.as_deref().map(parse_date).transpose()?,
        })
    }
}

#[async_trait]
impl AuthorRepositoryPort for SqliteAuthorRepository {
    async fn create(&self, fields: AuthorFields) -> Result<Author, RepositoryError> {
        let id = AuthorId::new();

        sqlx::query(
            r#"
            INSERT INTO authors (id, first_name, family_name, date_of_birth, date_of_death)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(&fields.first_name)
        .bind(&fields.family_name)
        .bind(date_to_string(fields.date_of_birth))
        .bind(date_to_string(fields.date_of_death))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(Author::new(id, fields))
    }

    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>, RepositoryError> {
        let row: Option<AuthorRow> = sqlx::query_as(
            "SELECT id, first_name, family_name, date_of_birth, date_of_death FROM authors WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(Author::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Author>, RepositoryError> {
        let rows: Vec<AuthorRow> = sqlx::query_as(
            "SELECT id, first_name, family_name, date_of_birth, date_of_death FROM authors",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Author::try_from).collect()
    }

    async fn replace(&self, id: AuthorId, fields: AuthorFields) -> Result<Author, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE authors
            SET first_name = ?, family_name = ?, date_of_birth = ?, date_of_death = ?
            WHERE id = ?
            "#,
        )
        .bind(&fields.first_name)
        .bind(&fields.family_name)
        .bind(date_to_string(fields.date_of_birth))
        .bind(date_to_string(fields.date_of_death))
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(Author::new(id, fields))
    }

    async fn delete(&self, id: AuthorId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM authors WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
