//! Command Handlers 实现
//!
//! 每类记录的变更工作流：校验 → 回显或持久化 → 重定向

mod author_handlers;
mod book_handlers;
mod book_instance_handlers;
mod genre_handlers;

pub use author_handlers::*;
pub use book_handlers::*;
pub use book_instance_handlers::*;
pub use genre_handlers::*;
