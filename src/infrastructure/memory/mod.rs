//! Memory Layer - In-Memory Entity Store
//!
//! 四类目录记录的内存实现，测试与演示场景使用

mod catalog_repos;

pub use catalog_repos::{
    InMemoryAuthorRepository, InMemoryBookInstanceRepository, InMemoryBookRepository,
    InMemoryGenreRepository,
};
