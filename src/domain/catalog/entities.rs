//! Catalog Context - Entities
//!
//! 四类目录记录。每类拆成两个结构:
//! - `XxxFields`: 可变字段全集，创建与整体替换共用的持久化载荷
//! - `Xxx`: 带标识的完整记录
//!
//! 不变量:
//! - 标识由 Entity Store 在创建时分配，之后不可变
//! - 引用字段只保存对方的标识，展开（population）在读取时进行

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{AuthorId, BookId, BookInstanceId, GenreId};

// ============================================================================
// Author
// ============================================================================

/// 作者可变字段
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorFields {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

/// 作者记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Author {
    pub id: AuthorId,
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: Option<NaiveDate>,
    pub date_of_death: Option<NaiveDate>,
}

impl Author {
    pub fn new(id: AuthorId, fields: AuthorFields) -> Self {
        Self {
            id,
            first_name: fields.first_name,
            family_name: fields.family_name,
            date_of_birth: fields.date_of_birth,
            date_of_death: fields.date_of_death,
        }
    }

    /// 提取可变字段（用于编辑表单回填）
    pub fn fields(&self) -> AuthorFields {
        AuthorFields {
            first_name: self.first_name.clone(),
            family_name: self.family_name.clone(),
            date_of_birth: self.date_of_birth,
            date_of_death: self.date_of_death,
        }
    }
}

// ============================================================================
// Genre
// ============================================================================

/// 类目可变字段
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreFields {
    pub name: String,
    pub category: Option<String>,
}

/// 类目记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: GenreId,
    pub name: String,
    pub category: Option<String>,
}

impl Genre {
    pub fn new(id: GenreId, fields: GenreFields) -> Self {
        Self {
            id,
            name: fields.name,
            category: fields.category,
        }
    }

    pub fn fields(&self) -> GenreFields {
        GenreFields {
            name: self.name.clone(),
            category: self.category.clone(),
        }
    }
}

// ============================================================================
// Book
// ============================================================================

/// 图书可变字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookFields {
    pub title: String,
    pub author: AuthorId,
    pub summary: String,
    pub isbn: String,
    pub genres: Vec<GenreId>,
}

/// 图书记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Book {
    pub id: BookId,
    pub title: String,
    pub author: AuthorId,
    pub summary: String,
    pub isbn: String,
    pub genres: Vec<GenreId>,
}

impl Book {
    pub fn new(id: BookId, fields: BookFields) -> Self {
        Self {
            id,
            title: fields.title,
            author: fields.author,
            summary: fields.summary,
            isbn: fields.isbn,
            genres: fields.genres,
        }
    }

    pub fn fields(&self) -> BookFields {
        BookFields {
            title: self.title.clone(),
            author: self.author,
            summary: self.summary.clone(),
            isbn: self.isbn.clone(),
            genres: self.genres.clone(),
        }
    }
}

// ============================================================================
// BookInstance
// ============================================================================

/// 副本流通状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CopyStatus {
    /// 在馆可借
    Available,
    /// 维护中
    Maintenance,
    /// 已借出
    Loaned,
    /// 已预约
    Reserved,
}

impl CopyStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CopyStatus::Available => "Available",
            CopyStatus::Maintenance => "Maintenance",
            CopyStatus::Loaned => "Loaned",
            CopyStatus::Reserved => "Reserved",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "Available" => Some(CopyStatus::Available),
            "Maintenance" => Some(CopyStatus::Maintenance),
            "Loaned" => Some(CopyStatus::Loaned),
            "Reserved" => Some(CopyStatus::Reserved),
            _ => None,
        }
    }
}

impl Default for CopyStatus {
    fn default() -> Self {
        CopyStatus::Maintenance
    }
}

/// 副本可变字段
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInstanceFields {
    pub book: BookId,
    pub imprint: String,
    pub status: CopyStatus,
    pub due_back: Option<NaiveDate>,
}

/// 馆藏副本记录
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookInstance {
    pub id: BookInstanceId,
    pub book: BookId,
    pub imprint: String,
    pub status: CopyStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstance {
    pub fn new(id: BookInstanceId, fields: BookInstanceFields) -> Self {
        Self {
            id,
            book: fields.book,
            imprint: fields.imprint,
            status: fields.status,
            due_back: fields.due_back,
        }
    }

    pub fn fields(&self) -> BookInstanceFields {
        BookInstanceFields {
            book: self.book,
            imprint: self.imprint.clone(),
            status: self.status,
            due_back: self.due_back,
        }
    }
}
