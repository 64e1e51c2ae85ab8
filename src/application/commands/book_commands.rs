//! Book Commands

use crate::application::validation::BookInput;
use crate::domain::catalog::BookId;

/// 创建图书命令
#[derive(Debug, Clone)]
pub struct CreateBook {
    pub input: BookInput,
}

/// 更新图书命令
#[derive(Debug, Clone)]
pub struct UpdateBook {
    pub book_id: BookId,
    pub input: BookInput,
}

/// 删除图书命令
#[derive(Debug, Clone)]
pub struct DeleteBook {
    pub book_id: BookId,
}
