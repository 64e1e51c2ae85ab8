//! SQLite Genre Repository

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{GenreRepositoryPort, RepositoryError};
use crate::domain::catalog::{Genre, GenreFields, GenreId};

/// SQLite Genre Repository
pub struct SqliteGenreRepository {
    pool: DbPool,
}

impl SqliteGenreRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct GenreRow {
    id: String,
    name: String,
    category: Option<String>,
}

impl TryFrom<GenreRow> for Genre {
    type Error = RepositoryError;

    fn try_from(row: GenreRow) -> Result<Self, Self::Error> {
        Ok(Genre {
            id: GenreId::from_uuid(
                Uuid::parse_str(&row.id)
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            ),
            name: row.name,
            category: row.category,
        })
    }
}

#[async_trait]
impl GenreRepositoryPort for SqliteGenreRepository {
    async fn create(&self, fields: GenreFields) -> Result<Genre, RepositoryError> {
        let id = GenreId::new();

        sqlx::query("INSERT INTO genres (id, name, category) VALUES (?, ?, ?)")
            .bind(id.to_string())
            .bind(&fields.name)
            .bind(&fields.category)
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(Genre::new(id, fields))
    }

    async fn find_by_id(&self, id: GenreId) -> Result<Option<Genre>, RepositoryError> {
        let row: Option<GenreRow> =
            sqlx::query_as("SELECT id, name, category FROM genres WHERE id = ?")
                .bind(id.to_string())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(Genre::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Genre>, RepositoryError> {
        let rows: Vec<GenreRow> = sqlx::query_as("SELECT id, name, category FROM genres")
            .fetch_all(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(Genre::try_from).collect()
    }

    async fn replace(&self, id: GenreId, fields: GenreFields) -> Result<Genre, RepositoryError> {
        let result = sqlx::query("UPDATE genres SET name = ?, category = ? WHERE id = ?")
            .bind(&fields.name)
            .bind(&fields.category)
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(Genre::new(id, fields))
    }

    async fn delete(&self, id: GenreId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM genres WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
