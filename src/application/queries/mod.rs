//! 应用层 - 查询（读操作）
//!
//! CQRS 查询侧：列表、详情、表单展示、删除确认

mod author_queries;
mod book_instance_queries;
mod book_queries;
mod genre_queries;

pub mod handlers;

pub use author_queries::*;
pub use book_instance_queries::*;
pub use book_queries::*;
pub use genre_queries::*;
