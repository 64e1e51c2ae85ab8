//! SQLite Book Repository
//!
//! genres 存在 book_genres 关联表，position 列保持提交顺序。
//! 写路径用事务保证图书行与关联行的原子性。

use async_trait::async_trait;
use sqlx::FromRow;
use uuid::Uuid;

use super::DbPool;
use crate::application::ports::{BookRepositoryPort, RepositoryError};
use crate::domain::catalog::{AuthorId, Book, BookFields, BookId, GenreId};

/// SQLite Book Repository
pub struct SqliteBookRepository {
    pool: DbPool,
}

impl SqliteBookRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    /// 读出某图书的类目标识，按 position 排序
    async fn load_genres(&self, book_id: &str) -> Result<Vec<GenreId>, RepositoryError> {
        let rows: Vec<(String,)> = sqlx::query_as(
            "SELECT genre_id FROM book_genres WHERE book_id = ? ORDER BY position",
        )
        .bind(book_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        rows.into_iter()
            .map(|(genre_id,)| {
                Uuid::parse_str(&genre_id)
                    .map(GenreId::from_uuid)
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()))
            })
            .collect()
    }

    async fn assemble(&self, row: BookRow) -> Result<Book, RepositoryError> {
        let genres = self.load_genres(&row.id).await?;
        let mut book = Book::try_from(row)?;
        book.genres = genres;
        Ok(book)
    }
}

#[derive(FromRow)]
struct BookRow {
    id: String,
    title: String,
    author_id: String,
    summary: String,
    isbn: String,
}

impl TryFrom<BookRow> for Book {
    type Error = RepositoryError;

    fn try_from(row: BookRow) -> Result<Self, Self::Error> {
        Ok(Book {
            id: BookId::from_uuid(
                Uuid::parse_str(&row.id)
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            ),
            title: row.title,
            author: AuthorId::from_uuid(
                Uuid::parse_str(&row.author_id)
                    .map_err(|e| RepositoryError::SerializationError(e.to_string()))?,
            ),
            summary: row.summary,
            isbn: row.isbn,
            genres: Vec::new(),
        })
    }
}

#[async_trait]
impl BookRepositoryPort for SqliteBookRepository {
    async fn create(&self, fields: BookFields) -> Result<Book, RepositoryError> {
        let id = BookId::new();

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        sqlx::query(
            "INSERT INTO books (id, title, author_id, summary, isbn) VALUES (?, ?, ?, ?, ?)",
        )
        .bind(id.to_string())
        .bind(&fields.title)
        .bind(fields.author.to_string())
        .bind(&fields.summary)
        .bind(&fields.isbn)
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        for (position, genre_id) in fields.genres.iter().enumerate() {
            sqlx::query(
                "INSERT INTO book_genres (book_id, genre_id, position) VALUES (?, ?, ?)",
            )
            .bind(id.to_string())
            .bind(genre_id.to_string())
            .bind(position as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(Book::new(id, fields))
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, RepositoryError> {
        let row: Option<BookRow> = sqlx::query_as(
            "SELECT id, title, author_id, summary, isbn FROM books WHERE id = ?",
        )
        .bind(id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        match row {
            Some(row) => Ok(Some(self.assemble(row).await?)),
            None => Ok(None),
        }
    }

    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError> {
        let rows: Vec<BookRow> =
            sqlx::query_as("SELECT id, title, author_id, summary, isbn FROM books")
                .fetch_all(&self.pool)
                .await
                .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let mut books = Vec::with_capacity(rows.len());
        for row in rows {
            books.push(self.assemble(row).await?);
        }
        Ok(books)
    }

    async fn find_by_author(&self, author: AuthorId) -> Result<Vec<Book>, RepositoryError> {
        let rows: Vec<BookRow> = sqlx::query_as(
            "SELECT id, title, author_id, summary, isbn FROM books WHERE author_id = ?",
        )
        .bind(author.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let mut books = Vec::with_capacity(rows.len());
        for row in rows {
            books.push(self.assemble(row).await?);
        }
        Ok(books)
    }

    async fn find_by_genre(&self, genre: GenreId) -> Result<Vec<Book>, RepositoryError> {
        let rows: Vec<BookRow> = sqlx::query_as(
            r#"
            SELECT b.id, b.title, b.author_id, b.summary, b.isbn
            FROM books b
            JOIN book_genres bg ON bg.book_id = b.id
            WHERE bg.genre_id = ?
            "#,
        )
        .bind(genre.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let mut books = Vec::with_capacity(rows.len());
        for row in rows {
            books.push(self.assemble(row).await?);
        }
        Ok(books)
    }

    async fn replace(&self, id: BookId, fields: BookFields) -> Result<Book, RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let result = sqlx::query(
            "UPDATE books SET title = ?, author_id = ?, summary = ?, isbn = ? WHERE id = ?",
        )
        .bind(&fields.title)
        .bind(fields.author.to_string())
        .bind(&fields.summary)
        .bind(&fields.isbn)
        .bind(id.to_string())
        .execute(&mut *tx)
        .await
        .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        // 关联行整体重建，保持提交顺序
        sqlx::query("DELETE FROM book_genres WHERE book_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        for (position, genre_id) in fields.genres.iter().enumerate() {
            sqlx::query(
                "INSERT INTO book_genres (book_id, genre_id, position) VALUES (?, ?, ?)",
            )
            .bind(id.to_string())
            .bind(genre_id.to_string())
            .bind(position as i64)
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;
        }

        tx.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(Book::new(id, fields))
    }

    async fn delete(&self, id: BookId) -> Result<bool, RepositoryError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        sqlx::query("DELETE FROM book_genres WHERE book_id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        let result = sqlx::query("DELETE FROM books WHERE id = ?")
            .bind(id.to_string())
            .execute(&mut *tx)
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        tx.commit()
            .await
            .map_err(|e| RepositoryError::DatabaseError(e.to_string()))?;

        Ok(result.rows_affected() > 0)
    }
}
