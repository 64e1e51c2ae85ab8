//! Author Commands

use crate::application::validation::AuthorInput;
use crate::domain::catalog::AuthorId;

/// 创建作者命令
#[derive(Debug, Clone)]
pub struct CreateAuthor {
    pub input: AuthorInput,
}

/// 更新作者命令（标识跨提交保持不变）
#[derive(Debug, Clone)]
pub struct UpdateAuthor {
    pub author_id: AuthorId,
    pub input: AuthorInput,
}

/// 删除作者命令（无条件，不级联也不拦截）
#[derive(Debug, Clone)]
pub struct DeleteAuthor {
    pub author_id: AuthorId,
}
