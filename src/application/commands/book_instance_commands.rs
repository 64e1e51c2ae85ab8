//! BookInstance Commands

use crate::application::validation::BookInstanceInput;
use crate::domain::catalog::BookInstanceId;

/// 创建副本命令
#[derive(Debug, Clone)]
pub struct CreateBookInstance {
    pub input: BookInstanceInput,
}

/// 更新副本命令
#[derive(Debug, Clone)]
pub struct UpdateBookInstance {
    pub instance_id: BookInstanceId,
    pub input: BookInstanceInput,
}

/// 删除副本命令
#[derive(Debug, Clone)]
pub struct DeleteBookInstance {
    pub instance_id: BookInstanceId,
}
