//! Catalog Context - Derived Fields
//!
//! 派生字段引擎: 全部为存储字段的纯函数，读取时重新计算，
//! 永不写回存储。日期缺失时返回空串或占位文案，绝不 panic。

use chrono::NaiveDate;

use super::{Author, Book, BookInstance, Genre};

/// 中等长度日期格式，如 "Oct 6, 2020"
pub fn format_medium_date(date: NaiveDate) -> String {
    date.format("%b %-d, %Y").to_string()
}

// ============================================================================
// 规范路径
// ============================================================================

pub fn author_list_path() -> &'static str {
    "/catalog/authors"
}

pub fn genre_list_path() -> &'static str {
    "/catalog/genres"
}

pub fn book_list_path() -> &'static str {
    "/catalog/books"
}

pub fn book_instance_list_path() -> &'static str {
    "/catalog/bookinstances"
}

// ============================================================================
// Author
// ============================================================================

impl Author {
    /// 展示名: "姓, 名"
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.family_name, self.first_name)
    }

    /// 生卒区间: "{生} - {卒}"，缺失的一端留空；
    /// 两端都缺失时返回固定文案 "No date registered"
    pub fn lifespan_label(&self) -> String {
        if self.date_of_birth.is_none() && self.date_of_death.is_none() {
            return "No date registered".to_string();
        }

        let mut label = String::new();
        if let Some(birth) = self.date_of_birth {
            label.push_str(&format_medium_date(birth));
        }
        label.push_str(" - ");
        if let Some(death) = self.date_of_death {
            label.push_str(&format_medium_date(death));
        }
        label
    }

    pub fn canonical_path(&self) -> String {
        format!("/catalog/author/{}", self.id)
    }

    pub fn update_path(&self) -> String {
        format!("/catalog/author/{}/update", self.id)
    }

    pub fn delete_path(&self) -> String {
        format!("/catalog/author/{}/delete", self.id)
    }

    /// 出生日期的 `%Y-%m-%d` 表示（编辑表单的 date input 取值），缺失为空串
    pub fn date_of_birth_ymd(&self) -> String {
        self.date_of_birth
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }

    /// 去世日期的 `%Y-%m-%d` 表示，缺失为空串
    pub fn date_of_death_ymd(&self) -> String {
        self.date_of_death
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

// ============================================================================
// Genre
// ============================================================================

impl Genre {
    pub fn canonical_path(&self) -> String {
        format!("/catalog/genre/{}", self.id)
    }

    pub fn update_path(&self) -> String {
        format!("/catalog/genre/{}/update", self.id)
    }

    pub fn delete_path(&self) -> String {
        format!("/catalog/genre/{}/delete", self.id)
    }
}

// ============================================================================
// Book
// ============================================================================

impl Book {
    pub fn canonical_path(&self) -> String {
        format!("/catalog/book/{}", self.id)
    }

    pub fn update_path(&self) -> String {
        format!("/catalog/book/{}/update", self.id)
    }

    pub fn delete_path(&self) -> String {
        format!("/catalog/book/{}/delete", self.id)
    }
}

// ============================================================================
// BookInstance
// ============================================================================

impl BookInstance {
    pub fn canonical_path(&self) -> String {
        format!("/catalog/bookinstance/{}", self.id)
    }

    pub fn update_path(&self) -> String {
        format!("/catalog/bookinstance/{}/update", self.id)
    }

    pub fn delete_path(&self) -> String {
        format!("/catalog/bookinstance/{}/delete", self.id)
    }

    /// 应还日期的中等长度表示，缺失为空串
    pub fn due_back_formatted(&self) -> String {
        self.due_back.map(format_medium_date).unwrap_or_default()
    }

    /// 应还日期的 `%Y-%m-%d` 表示（编辑表单取值），缺失为空串
    pub fn due_back_ymd(&self) -> String {
        self.due_back
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::catalog::{
        AuthorFields, AuthorId, BookId, BookInstanceFields, BookInstanceId, CopyStatus,
    };

    fn author_with_dates(birth: Option<NaiveDate>, death: Option<NaiveDate>) -> Author {
        Author::new(
            AuthorId::new(),
            AuthorFields {
                first_name: "John".into(),
                family_name: "Tolkien".into(),
                date_of_birth: birth,
                date_of_death: death,
            },
        )
    }

    #[test]
    fn test_format_medium_date() {
        let date = NaiveDate::from_ymd_opt(2020, 10, 6).unwrap();
        assert_eq!(format_medium_date(date), "Oct 6, 2020");
    }

    #[test]
    fn test_display_name() {
        let author = author_with_dates(None, None);
        assert_eq!(author.display_name(), "Tolkien, John");
    }

    #[test]
    fn test_lifespan_with_both_dates() {
        let author = author_with_dates(
            NaiveDate::from_ymd_opt(1892, 1, 3),
            NaiveDate::from_ymd_opt(1973, 9, 2),
        );
        assert_eq!(author.lifespan_label(), "Jan 3, 1892 - Sep 2, 1973");
    }

    #[test]
    fn test_lifespan_with_only_birth_ends_with_dash() {
        let author = author_with_dates(NaiveDate::from_ymd_opt(1892, 1, 3), None);
        let label = author.lifespan_label();
        assert!(label.ends_with(" - "));
        assert!(label.starts_with("Jan 3, 1892"));
    }

    #[test]
    fn test_lifespan_with_only_death_starts_with_dash() {
        let author = author_with_dates(None, NaiveDate::from_ymd_opt(1973, 9, 2));
        assert_eq!(author.lifespan_label(), " - Sep 2, 1973");
    }

    #[test]
    fn test_lifespan_without_dates_is_placeholder() {
        let author = author_with_dates(None, None);
        assert_eq!(author.lifespan_label(), "No date registered");
    }

    #[test]
    fn test_canonical_paths() {
        let author = author_with_dates(None, None);
        assert_eq!(
            author.canonical_path(),
            format!("/catalog/author/{}", author.id)
        );
        assert_eq!(
            author.update_path(),
            format!("/catalog/author/{}/update", author.id)
        );
        assert_eq!(author_list_path(), "/catalog/authors");
        assert_eq!(book_instance_list_path(), "/catalog/bookinstances");
    }

    #[test]
    fn test_date_ymd_helpers() {
        let author = author_with_dates(NaiveDate::from_ymd_opt(1892, 1, 3), None);
        assert_eq!(author.date_of_birth_ymd(), "1892-01-03");
        assert_eq!(author.date_of_death_ymd(), "");
    }

    #[test]
    fn test_due_back_formatted_empty_when_absent() {
        let instance = BookInstance::new(
            BookInstanceId::new(),
            BookInstanceFields {
                book: BookId::new(),
                imprint: "2016, Pearson".into(),
                status: CopyStatus::Available,
                due_back: None,
            },
        );
        assert_eq!(instance.due_back_formatted(), "");
        assert_eq!(instance.due_back_ymd(), "");
    }

    #[test]
    fn test_due_back_formatted_present() {
        let instance = BookInstance::new(
            BookInstanceId::new(),
            BookInstanceFields {
                book: BookId::new(),
                imprint: "2016, Pearson".into(),
                status: CopyStatus::Loaned,
                due_back: NaiveDate::from_ymd_opt(2024, 3, 15),
            },
        );
        assert_eq!(instance.due_back_formatted(), "Mar 15, 2024");
    }
}
