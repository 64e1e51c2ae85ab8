//! Catalog Context - 馆藏目录限界上下文
//!
//! 职责:
//! - 四类目录记录: Author / Genre / Book / BookInstance
//! - 记录标识与副本状态枚举
//! - 派生字段计算（展示名、生卒区间、规范路径等）

mod derived;
mod entities;
mod value_objects;

pub use derived::{
    author_list_path, book_instance_list_path, book_list_path, format_medium_date,
    genre_list_path,
};
pub use entities::{
    Author, AuthorFields, Book, BookFields, BookInstance, BookInstanceFields, CopyStatus, Genre,
    GenreFields,
};
pub use value_objects::{AuthorId, BookId, BookInstanceId, GenreId};
