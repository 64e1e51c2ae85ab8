//! 应用层 - 命令（写操作）
//!
//! CQRS 命令侧：四类记录各自的创建 / 更新 / 删除工作流

mod author_commands;
mod book_commands;
mod book_instance_commands;
mod genre_commands;

pub mod handlers;

pub use author_commands::*;
pub use book_commands::*;
pub use book_instance_commands::*;
pub use genre_commands::*;
