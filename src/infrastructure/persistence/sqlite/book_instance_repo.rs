//! SQLite BookInstance Repository

use async_trait::async_trait;
use chrono::NaiveDate;
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{BookInstanceRepositoryPort, RepositoryError};
use crate::domain::catalog::{
    BookId, BookInstance, BookInstanceFields, BookInstanceId, CopyStatus,
};

/// SQLite BookInstance Repository
pub struct SqliteBookInstanceRepository {
    pool: DbPool,
}

impl SqliteBookInstanceRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

#[derive(FromRow)]
struct BookInstanceRow {
    id: String,
    book_id: String,
    imprint: String,
    status: String,
    due_back: Option<String>,
}

impl TryFrom<BookInstanceRow> for BookInstance {
    type Error = RepositoryError;

    fn try_from(row: BookInstanceRow) -> Result<Self, Self::Error> {
        Ok(BookInstance {
            id: BookInstanceId::from_uuid(
                Uuid::parse_str(&row.id)
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            ),
            book: BookId::from_uuid(
                Uuid::parse_str(&row.book_id)
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            ),
            imprint: row.imprint,
            status: CopyStatus::from_str(&row.status).ok_or_else(|| {
                RepositoryError::SerializationError(format!(
                    "Unknown copy status: {}",
                    row.status
                ))
            })?,
            due_back: row
                .due_back
                .as_deref()
                .map(|d| {
                    NaiveDate::parse_from_str(d, "%Y-%m-%d")
                        .map_err(|e| RepositoryError::SerializationError(e.to_string()))
                })
                .transpose()?,
        })
    }
}

#[async_trait]
impl BookInstanceRepositoryPort for SqliteBookInstanceRepository {
    async fn create(
        &self,
        fields: BookInstanceFields,
    ) -> Result<BookInstance, RepositoryError> {
        let id = BookInstanceId::new();

        sqlx::query(
            r#"
            INSERT INTO book_instances (id, book_id, imprint, status, due_back)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(id.to_string())
        .bind(fields.book.to_string())
        .bind(&fields.imprint)
        .bind(fields.status.as_str())
        .bind(fields.due_back.map(|d| d.format("%Y-%m-%d").to_string()))
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(BookInstance::new(id, fields))
    }

    async fn find_by_id(
        &self,
        id: BookInstanceId,
    ) -> Result<Option<BookInstance>, RepositoryError> {
        let row: Option<BookInstanceRow> = sqlx::query_as(
            "SELECT id, book_id, imprint, status, due_back FROM book_instances WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        row.map(BookInstance::try_from).transpose()
    }

    async fn find_all(&self) -> Result<Vec<BookInstance>, RepositoryError> {
        let rows: Vec<BookInstanceRow> = sqlx::query_as(
            "SELECT id, book_id, imprint, status, due_back FROM book_instances",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(BookInstance::try_from).collect()
    }

    async fn find_by_book(&self, book: BookId) -> Result<Vec<BookInstance>, RepositoryError> {
        let rows: Vec<BookInstanceRow> = sqlx::query_as(
            "SELECT id, book_id, imprint, status, due_back FROM book_instances WHERE book_id = ?",
        )
        .bind(book.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter().map(BookInstance::try_from).collect()
    }

    async fn replace(
        &self,
        id: BookInstanceId,
        fields: BookInstanceFields,
    ) -> Result<BookInstance, RepositoryError> {
        let result = sqlx::query(
            r#"
            UPDATE book_instances
            SET book_id = ?, imprint = ?, status = ?, due_back = ?
            WHERE id = ?
            "#,
        )
        .bind(fields.book.to_string())
        .bind(&fields.imprint)
        .bind(fields.status.as_str())
        .bind(fields.due_back.map(|d| d.format("%Y-%m-%d").to_string()))
        .bind(id.to_string())
        .execute(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(BookInstance::new(id, fields))
    }

    async fn delete(&self, id: BookInstanceId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM book_instances WHERE id = ?")
            .bind(id.to_string())
            .execute(&self.pool)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
