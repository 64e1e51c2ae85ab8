//! Repository Ports - 出站端口
//!
//! 定义 Entity Store 的抽象接口，每类记录一个端口。
//! 具体实现在 infrastructure 层（SQLite / 内存）。
//!
//! 统一契约:
//! - `create` 由存储分配标识并返回完整记录
//! - `find_by_id` 缺失返回 `Ok(None)`，不是错误
//! - `find_all` 不保证顺序，展示排序由调用方负责
//! - `replace` 整体替换可变字段，标识保持不变，缺失返回 `NotFound`
//! - `delete` 无条件删除，返回是否确有记录被删（幂等）

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::catalog::{
    Author, AuthorFields, AuthorId, Book, BookFields, BookId, BookInstance, BookInstanceFields,
    BookInstanceId, Genre, GenreFields, GenreId,
};

/// Repository 错误
#[derive(Debug, Error)]
pub enum RepositoryError {
    #[error("Record not found")]
    NotFound,

    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

// ============================================================================
// Author Repository
// ============================================================================

/// Author Repository Port
#[async_trait]
pub trait AuthorRepositoryPort: Send + Sync {
    /// 创建作者（分配标识）
    async fn create(&self, fields: AuthorFields) -> Result<Author, RepositoryError>;

    /// 根据 ID 查找作者
    async fn find_by_id(&self, id: AuthorId) -> Result<Option<Author>, RepositoryError>;

    /// 获取所有作者
    async fn find_all(&self) -> Result<Vec<Author>, RepositoryError>;

    /// 整体替换可变字段
    async fn replace(&self, id: AuthorId, fields: AuthorFields) -> Result<Author, RepositoryError>;

    /// 删除作者，返回是否确有记录被删
    async fn delete(&self, id: AuthorId) -> Result<bool, RepositoryError>;
}

// ============================================================================
// Genre Repository
// ============================================================================

/// Genre Repository Port
#[async_trait]
pub trait GenreRepositoryPort: Send + Sync {
    /// 创建类目（分配标识）
    async fn create(&self, fields: GenreFields) -> Result<Genre, RepositoryError>;

    /// 根据 ID 查找类目
    async fn find_by_id(&self, id: GenreId) -> Result<Option<Genre>, RepositoryError>;

    /// 获取所有类目
    async fn find_all(&self) -> Result<Vec<Genre>, RepositoryError>;

    /// 整体替换可变字段
    async fn replace(&self, id: GenreId, fields: GenreFields) -> Result<Genre, RepositoryError>;

    /// 删除类目，返回是否确有记录被删
    async fn delete(&self, id: GenreId) -> Result<bool, RepositoryError>;
}

// ============================================================================
// Book Repository
// ============================================================================

/// Book Repository Port
#[async_trait]
pub trait BookRepositoryPort: Send + Sync {
    /// 创建图书（分配标识）
    async fn create(&self, fields: BookFields) -> Result<Book, RepositoryError>;

    /// 根据 ID 查找图书
    async fn find_by_id(&self, id: BookId) -> Result<Option<Book>, RepositoryError>;

    /// 获取所有图书
    async fn find_all(&self) -> Result<Vec<Book>, RepositoryError>;

    /// 获取某作者的所有图书
    async fn find_by_author(&self, author: AuthorId) -> Result<Vec<Book>, RepositoryError>;

    /// 获取含某类目的所有图书
    async fn find_by_genre(&self, genre: GenreId) -> Result<Vec<Book>, RepositoryError>;

    /// 整体替换可变字段
    async fn replace(&self, id: BookId, fields: BookFields) -> Result<Book, RepositoryError>;

    /// 删除图书，返回是否确有记录被删
    async fn delete(&self, id: BookId) -> Result<bool, RepositoryError>;
}

// ============================================================================
// BookInstance Repository
// ============================================================================

/// BookInstance Repository Port
#[async_trait]
pub trait BookInstanceRepositoryPort: Send + Sync {
    /// 创建副本（分配标识）
    async fn create(&self, fields: BookInstanceFields)
        -> Result<BookInstance, RepositoryError>;

    /// 根据 ID 查找副本
    async fn find_by_id(
        &self,
        id: BookInstanceId,
    ) -> Result<Option<BookInstance>, RepositoryError>;

    /// 获取所有副本
    async fn find_all(&self) -> Result<Vec<BookInstance>, RepositoryError>;

    /// 获取某图书的所有副本
    async fn find_by_book(&self, book: BookId) -> Result<Vec<BookInstance>, RepositoryError>;

    /// 整体替换可变字段
    async fn replace(
        &self,
        id: BookInstanceId,
        fields: BookInstanceFields,
    ) -> Result<BookInstance, RepositoryError>;

    /// 删除副本，返回是否确有记录被删
    async fn delete(&self, id: BookInstanceId) -> Result<bool, RepositoryError>;
}
