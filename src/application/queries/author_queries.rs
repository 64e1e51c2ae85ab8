//! Author Queries

use crate::domain::catalog::AuthorId;

/// 列出所有作者（按姓、名升序）
#[derive(Debug, Clone)]
pub struct ListAuthors;

/// 获取作者详情（含其名下图书）
#[derive(Debug, Clone)]
pub struct GetAuthor {
    pub author_id: AuthorId,
}

/// 获取作者创建表单（空草稿）
#[derive(Debug, Clone)]
pub struct GetAuthorCreateForm;

/// 获取作者编辑表单（回填已存储字段）
#[derive(Debug, Clone)]
pub struct GetAuthorUpdateForm {
    pub author_id: AuthorId,
}

/// 获取作者删除确认页
#[derive(Debug, Clone)]
pub struct GetAuthorDeleteConfirm {
    pub author_id: AuthorId,
}
