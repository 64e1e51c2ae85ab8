//! Infrastructure Layer - 基础设施层
//!
//! 提供所有端口的具体实现

pub mod memory;
pub mod persistence;

pub use memory::{
    InMemoryAuthorRepository, InMemoryBookInstanceRepository, InMemoryBookRepository,
    InMemoryGenreRepository,
};
pub use persistence::sqlite::{
    DatabaseConfig, SqliteAuthorRepository, SqliteBookInstanceRepository, SqliteBookRepository,
    SqliteGenreRepository,
};
