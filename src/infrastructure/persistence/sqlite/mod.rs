//! SQLite Persistence - SQLite 数据库持久化实现

mod database;
mod author_repo;
mod genre_repo;
mod book_repo;
mod book_instance_repo;

pub use database::*;
pub use author_repo::*;
pub use genre_repo::*;
pub use book_repo::*;
pub use book_instance_repo::*;
