//! Genre Queries

use crate::domain::catalog::GenreId;

/// 列出所有类目
#[derive(Debug, Clone)]
pub struct ListGenres;

/// 获取类目详情（含该类目下图书）
#[derive(Debug, Clone)]
pub struct GetGenre {
    pub genre_id: GenreId,
}

/// 获取类目创建表单（空草稿）
#[derive(Debug, Clone)]
pub struct GetGenreCreateForm;

/// 获取类目编辑表单
#[derive(Debug, Clone)]
pub struct GetGenreUpdateForm {
    pub genre_id: GenreId,
}

/// 获取类目删除确认页
#[derive(Debug, Clone)]
pub struct GetGenreDeleteConfirm {
    pub genre_id: GenreId,
}
