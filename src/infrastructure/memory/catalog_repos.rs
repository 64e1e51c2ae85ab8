//! 内存版 Entity Store
//!
//! 以 DashMap 承载四类目录记录，实现与 SQLite 版完全相同的
//! 端口契约。记录标识在 `create` 时分配。

use async_trait::async_trait;
use dashmap::DashMap;

use crate::application::ports::{
    AuthorRepositoryPort, BookInstanceRepositoryPort, BookRepositoryPort, GenreRepositoryPort,
    RepositoryError,
};
use crate::domain::catalog::{
    Author, AuthorFields, AuthorId, Book, BookFields, BookId, BookInstance, BookInstanceFields,
    BookInstanceId, Genre, GenreFields, GenreId,
};

// ============================================================================
// Author
// ============================================================================

/// 内存版作者存储
pub struct InMemoryAuthorRepository {
    records: DashMap<AuthorId, Author>,
}

impl InMemoryAuthorRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }
}

impl Default for InMemoryAuthorRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl AuthorRepositoryPort for InMemoryAuthorRepository {
    async fn create(&self, fields: AuthorFields) -> Result<Author, RepositoryError> {
        let author = Author::new(AuthorId::new(), fields);
        self.records.insert(author.id, author.clone());
        Ok(author)
    }

    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>, RepositoryError> {
        Ok(self.records.get(&id).map(|r| r.clone()))
    }

    async fn find_all(&self) -> Result<Vec<Author>, RepositoryError> {
        Ok(self.records.iter().map(|r| r.clone()).collect())
    }

    async fn replace(&self, id: AuthorId, fields: AuthorFields) -> Result<Author, RepositoryError> {
        let mut entry = self.records.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        *entry = Author::new(id, fields);
        Ok(entry.clone())
    }

    async fn delete(&self, id: AuthorId) -> Result<bool, RepositoryError> {
        Ok(self.records.remove(&id).is_some())
    }
}

// ============================================================================
// Genre
// ============================================================================

/// 内存版类目存储
pub struct InMemoryGenreRepository {
    records: DashMap<GenreId, Genre>,
}

impl InMemoryGenreRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }
}

impl Default for InMemoryGenreRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl GenreRepositoryPort for InMemoryGenreRepository {
    async fn create(&self, fields: GenreFields) -> Result<Genre, RepositoryError> {
        let genre = Genre::new(GenreId::new(), fields);
        self.records.insert(genre.id, genre.clone());
        Ok(genre)
    }

    async fn find_by_id(&self, id: GenreId) -> Result<Option<Genre>, RepositoryError> {
        Ok(self.records.get(&id).map(|r| r.clone()))
    }

    async fn find_all(&self) -> Result<Vec<Genre>, RepositoryError> {
        Ok(self.records.iter().map(|r| r.clone()).collect())
    }

    async fn replace(&self, id: GenreId, fields: GenreFields) -> Result<Genre, RepositoryError> {
        let mut entry = self.records.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        *entry = Genre::new(id, fields);
        Ok(entry.clone())
    }

    async fn delete(&self, id: GenreId) -> Result<bool, RepositoryError> {
        Ok(self.records.remove(&id).is_some())
    }
}

// ============================================================================
// Book
// ============================================================================

/// 内存版图书存储
pub struct InMemoryBookRepository {
    records: DashMap<BookId, Book>,
}

impl InMemoryBookRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }
}

impl Default for InMemoryBookRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookRepositoryPort for InMemoryBookRepository {
    async fn create(&self, fields: BookFields) -> Result<Book, RepositoryError> {
        let book = Book::new(BookId::new(), fields);
        self.records.insert(book.id, book.clone());
        Ok(book)
    }

    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, RepositoryError> {
        Ok(self.records.get(&id).map(|r| r.clone()))
    }

    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError> {
        Ok(self.records.iter().map(|r| r.clone()).collect())
    }

    async fn find_by_author(&self, author: AuthorId) -> Result<Vec<Book>, RepositoryError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.author == author)
            .map(|r| r.clone())
            .collect())
    }

    async fn find_by_genre(&self, genre: GenreId) -> Result<Vec<Book>, RepositoryError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.genres.contains(&genre))
            .map(|r| r.clone())
            .collect())
    }

    async fn replace(&self, id: BookId, fields: BookFields) -> Result<Book, RepositoryError> {
        let mut entry = self.records.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        *entry = Book::new(id, fields);
        Ok(entry.clone())
    }

    async fn delete(&self, id: BookId) -> Result<bool, RepositoryError> {
        Ok(self.records.remove(&id).is_some())
    }
}

// ============================================================================
// BookInstance
// ============================================================================

/// 内存版副本存储
pub struct InMemoryBookInstanceRepository {
    records: DashMap<BookInstanceId, BookInstance>,
}

impl InMemoryBookInstanceRepository {
    pub fn new() -> Self {
        Self {
            records: DashMap::new(),
        }
    }
}

impl Default for InMemoryBookInstanceRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl BookInstanceRepositoryPort for InMemoryBookInstanceRepository {
    async fn create(
        &self,
        fields: BookInstanceFields,
    ) -> Result<BookInstance, RepositoryError> {
        let instance = BookInstance::new(BookInstanceId::new(), fields);
        self.records.insert(instance.id, instance.clone());
        Ok(instance)
    }

    async fn find_by_id(
        &self,
        id: BookInstanceId,
    ) -> Result<Option<BookInstance>, RepositoryError> {
        Ok(self.records.get(&id).map(|r| r.clone()))
    }

    async fn find_all(&self) -> Result<Vec<BookInstance>, RepositoryError> {
        Ok(self.records.iter().map(|r| r.clone()).collect())
    }

    async fn find_by_book(&self, book: BookId) -> Result<Vec<BookInstance>, RepositoryError> {
        Ok(self
            .records
            .iter()
            .filter(|r| r.book == book)
            .map(|r| r.clone())
            .collect())
    }

    async fn replace(
        &self,
        id: BookInstanceId,
        fields: BookInstanceFields,
    ) -> Result<BookInstance, RepositoryError> {
        let mut entry = self.records.get_mut(&id).ok_or(RepositoryError::NotFound)?;
        *entry = BookInstance::new(id, fields);
        Ok(entry.clone())
    }

    async fn delete(&self, id: BookInstanceId) -> Result<bool, RepositoryError> {
        Ok(self.records.remove(&id).is_some())
    }
}
