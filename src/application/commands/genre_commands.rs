//! Genre Commands

use crate::application::validation::GenreInput;
use crate::domain::catalog::GenreId;

/// 创建类目命令
#[derive(Debug, Clone)]
pub struct CreateGenre {
    pub input: GenreInput,
}

/// 更新类目命令
#[derive(Debug, Clone)]
pub struct UpdateGenre {
    pub genre_id: GenreId,
    pub input: GenreInput,
}

/// 删除类目命令
#[derive(Debug, Clone)]
pub struct DeleteGenre {
    pub genre_id: GenreId,
}
