//! Book Queries

use crate::domain::catalog::BookId;

/// 列出所有图书（引用已展开）
#[derive(Debug, Clone)]
pub struct ListBooks;

/// 获取图书详情（引用已展开，含馆藏副本）
#[derive(Debug, Clone)]
pub struct GetBook {
    pub book_id: BookId,
}

/// 获取图书创建表单（空草稿 + 作者/类目辅助列表）
#[derive(Debug, Clone)]
pub struct GetBookCreateForm;

/// 获取图书编辑表单（目标记录与辅助列表并发获取）
#[derive(Debug, Clone)]
pub struct GetBookUpdateForm {
    pub book_id: BookId,
}

/// 获取图书删除确认页
#[derive(Debug, Clone)]
pub struct GetBookDeleteConfirm {
    pub book_id: BookId,
}
