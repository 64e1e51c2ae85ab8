//! 查询处理器
//!
//! 每个处理器持有所需端口的 Arc 引用，产出面向展示的视图结构。
//! 视图里的派生字段全部在读取时计算，处理器绝不写存储。

mod author_handlers;
mod book_handlers;
mod book_instance_handlers;
mod genre_handlers;

pub use author_handlers::*;
pub use book_handlers::*;
pub use book_instance_handlers::*;
pub use genre_handlers::*;
