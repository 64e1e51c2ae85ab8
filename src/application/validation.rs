//! 校验流水线
//!
//! 把原始表单输入转换为可持久化的字段集或可回显的草稿:
//! - 逐字段独立评估，一次提交报出全部违规，不短路
//! - 所有字符串先 trim 再做 HTML 转义，错误路径同样执行
//!   （草稿要原样回显给表单）
//! - 日期按 `%Y-%m-%d` 解析并规范化为 `NaiveDate`
//! - 引用字段按 UUID 解析，垃圾输入记 `InvalidFormat`
//!
//! 有错误时存储绝不会被触碰；无错误时草稿就是持久化载荷本身。

use chrono::NaiveDate;
use uuid::Uuid;

use crate::domain::catalog::{
    AuthorFields, AuthorId, BookFields, BookId, BookInstanceFields, CopyStatus, GenreFields,
    GenreId,
};

// ============================================================================
// 错误模型
// ============================================================================

/// 单字段违规类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldErrorKind {
    /// 必填字段 trim 后为空
    Required,
    /// 长度越出声明区间
    LengthOutOfRange,
    /// 无法解析为目标类型（日期 / UUID / 枚举值）
    InvalidFormat,
}

/// 单字段违规
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub kind: FieldErrorKind,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, kind: FieldErrorKind, message: impl Into<String>) -> Self {
        Self {
            field,
            kind,
            message: message.into(),
        }
    }
}

/// 校验结果: 通过时携带持久化载荷，否则携带回显草稿与全部违规
#[derive(Debug, Clone)]
pub enum Validated<Fields, Draft> {
    Valid(Fields),
    Invalid {
        draft: Draft,
        errors: Vec<FieldError>,
    },
}

// ============================================================================
// 原始输入
// ============================================================================

/// 作者表单原始输入
#[derive(Debug, Clone, Default)]
pub struct AuthorInput {
    pub first_name: String,
    pub family_name: String,
    pub date_of_birth: String,
    pub date_of_death: String,
}

/// 类目表单原始输入
#[derive(Debug, Clone, Default)]
pub struct GenreInput {
    pub name: String,
    pub category: String,
}

/// 图书表单原始输入
#[derive(Debug, Clone, Default)]
pub struct BookInput {
    pub title: String,
    pub author: String,
    pub summary: String,
    pub isbn: String,
    pub genres: Vec<String>,
}

/// 副本表单原始输入
#[derive(Debug, Clone, Default)]
pub struct BookInstanceInput {
    pub book: String,
    pub imprint: String,
    pub status: String,
    pub due_back: String,
}

// ============================================================================
// 回显草稿（引用未解析成功时对应端为 None）
// ============================================================================

/// 图书草稿
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookDraft {
    pub title: String,
    pub author: Option<AuthorId>,
    pub summary: String,
    pub isbn: String,
    pub genres: Vec<GenreId>,
}

/// 副本草稿
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookInstanceDraft {
    pub book: Option<BookId>,
    pub imprint: String,
    pub status: CopyStatus,
    pub due_back: Option<NaiveDate>,
}

impl From<BookFields> for BookDraft {
    /// 已存储字段回填编辑表单
    fn from(fields: BookFields) -> Self {
        Self {
            title: fields.title,
            author: Some(fields.author),
            summary: fields.summary,
            isbn: fields.isbn,
            genres: fields.genres,
        }
    }
}

impl From<BookInstanceFields> for BookInstanceDraft {
    /// 已存储字段回填编辑表单
    fn from(fields: BookInstanceFields) -> Self {
        Self {
            book: Some(fields.book),
            imprint: fields.imprint,
            status: fields.status,
            due_back: fields.due_back,
        }
    }
}

// ============================================================================
// 基础规则
// ============================================================================

/// trim 后做 HTML 转义
fn sanitize(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.trim().len());
    for c in raw.trim().chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// 必填检查，长度按转义前的字符数计
fn check_required(
    field: &'static str,
    raw: &str,
    label: &str,
    errors: &mut Vec<FieldError>,
) {
    if raw.trim().is_empty() {
        errors.push(FieldError::new(
            field,
            FieldErrorKind::Required,
            format!("{} must be specified", label),
        ));
    }
}

/// 上界检查（空值不检查，交给 Required 规则）
fn check_max_len(
    field: &'static str,
    raw: &str,
    max: usize,
    label: &str,
    errors: &mut Vec<FieldError>,
) {
    let len = raw.trim().chars().count();
    if len > max {
        errors.push(FieldError::new(
            field,
            FieldErrorKind::LengthOutOfRange,
            format!("{} must not exceed {} characters", label, max),
        ));
    }
}

/// 区间检查（空值不检查，交给 Required 规则）
fn check_len_range(
    field: &'static str,
    raw: &str,
    min: usize,
    max: usize,
    label: &str,
    errors: &mut Vec<FieldError>,
) {
    let len = raw.trim().chars().count();
    if len > 0 && (len < min || len > max) {
        errors.push(FieldError::new(
            field,
            FieldErrorKind::LengthOutOfRange,
            format!("{} must be between {} and {} characters", label, min, max),
        ));
    }
}

/// 可选日期: 空为 None，解析失败记 InvalidFormat 且草稿端为 None
fn parse_optional_date(
    field: &'static str,
    raw: &str,
    label: &str,
    errors: &mut Vec<FieldError>,
) -> Option<NaiveDate> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(FieldError::new(
                field,
                FieldErrorKind::InvalidFormat,
                format!("Invalid {}", label),
            ));
            None
        }
    }
}

/// 必填引用: 空记 Required，非 UUID 记 InvalidFormat
fn parse_required_id(
    field: &'static str,
    raw: &str,
    label: &str,
    errors: &mut Vec<FieldError>,
) -> Option<Uuid> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        errors.push(FieldError::new(
            field,
            FieldErrorKind::Required,
            format!("{} must be specified", label),
        ));
        return None;
    }
    match Uuid::parse_str(trimmed) {
        Ok(uuid) => Some(uuid),
        Err(_) => {
            errors.push(FieldError::new(
                field,
                FieldErrorKind::InvalidFormat,
                format!("Invalid {} reference", label),
            ));
            None
        }
    }
}

// ============================================================================
// Author
// ============================================================================

/// 作者表单校验
///
/// 规则表: first_name 必填且 ≤100；family_name 必填且 ≤100；
/// 两个日期可选，`%Y-%m-%d`
pub fn validate_author(input: &AuthorInput) -> Validated<AuthorFields, AuthorFields> {
    let mut errors = Vec::new();

    check_required("first_name", &input.first_name, "First name", &mut errors);
    check_max_len("first_name", &input.first_name, 100, "First name", &mut errors);
    check_required("family_name", &input.family_name, "Family name", &mut errors);
    check_max_len("family_name", &input.family_name, 100, "Family name", &mut errors);

    let fields = AuthorFields {
        first_name: sanitize(&input.first_name),
        family_name: sanitize(&input.family_name),
        date_of_birth: parse_optional_date(
            "date_of_birth",
            &input.date_of_birth,
            "date of birth",
            &mut errors,
        ),
        date_of_death: parse_optional_date(
            "date_of_death",
            &input.date_of_death,
            "date of death",
            &mut errors,
        ),
    };

    if errors.is_empty() {
        Validated::Valid(fields)
    } else {
        Validated::Invalid {
            draft: fields,
            errors,
        }
    }
}

// ============================================================================
// Genre
// ============================================================================

/// 类目表单校验
///
/// 规则表: name 必填且 3–100 字符；category 可选。
/// 原始数据字典声明了 name 的长度区间，这里照字典执行。
pub fn validate_genre(input: &GenreInput) -> Validated<GenreFields, GenreFields> {
    let mut errors = Vec::new();

    check_required("name", &input.name, "Genre name", &mut errors);
    check_len_range("name", &input.name, 3, 100, "Genre name", &mut errors);

    let category = sanitize(&input.category);
    let fields = GenreFields {
        name: sanitize(&input.name),
        category: if category.is_empty() {
            None
        } else {
            Some(category)
        },
    };

    if errors.is_empty() {
        Validated::Valid(fields)
    } else {
        Validated::Invalid {
            draft: fields,
            errors,
        }
    }
}

// ============================================================================
// Book
// ============================================================================

/// 图书表单校验
///
/// 规则表: title / summary / isbn 必填；author 必填且为合法引用；
/// genres 零或多个，每项都必须是合法引用，按集合处理（重复合并）
pub fn validate_book(input: &BookInput) -> Validated<BookFields, BookDraft> {
    let mut errors = Vec::new();

    check_required("title", &input.title, "Title", &mut errors);
    check_required("summary", &input.summary, "Summary", &mut errors);
    check_required("isbn", &input.isbn, "ISBN", &mut errors);

    let author = parse_required_id("author", &input.author, "Author", &mut errors)
        .map(AuthorId::from_uuid);

    let mut genres = Vec::new();
    for raw in &input.genres {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            continue;
        }
        match Uuid::parse_str(trimmed) {
            // 集合语义: 重复引用只保留首次出现
            Ok(uuid) => {
                let genre = GenreId::from_uuid(uuid);
                if !genres.contains(&genre) {
                    genres.push(genre);
                }
            }
            Err(_) => errors.push(FieldError::new(
                "genres",
                FieldErrorKind::InvalidFormat,
                "Invalid genre reference",
            )),
        }
    }

    let draft = BookDraft {
        title: sanitize(&input.title),
        author,
        summary: sanitize(&input.summary),
        isbn: sanitize(&input.isbn),
        genres,
    };

    if errors.is_empty() {
        if let Some(author) = draft.author {
            return Validated::Valid(BookFields {
                title: draft.title,
                author,
                summary: draft.summary,
                isbn: draft.isbn,
                genres: draft.genres,
            });
        }
    }

    Validated::Invalid { draft, errors }
}

// ============================================================================
// BookInstance
// ============================================================================

/// 副本表单校验
///
/// 规则表: book 必填且为合法引用；imprint 必填；status 必须是四个
/// 枚举值之一；due_back 可选日期，但 status 为 Loaned 时必填
/// （数据字典如此声明，这里照字典执行）
pub fn validate_book_instance(
    input: &BookInstanceInput,
) -> Validated<BookInstanceFields, BookInstanceDraft> {
    let mut errors = Vec::new();

    let book =
        parse_required_id("book", &input.book, "Book", &mut errors).map(BookId::from_uuid);

    check_required("imprint", &input.imprint, "Imprint", &mut errors);

    let status_raw = input.status.trim();
    let status = if status_raw.is_empty() {
        errors.push(FieldError::new(
            "status",
            FieldErrorKind::Required,
            "Status must be specified",
        ));
        CopyStatus::default()
    } else {
        match CopyStatus::from_str(status_raw) {
            Some(status) => status,
            None => {
                errors.push(FieldError::new(
                    "status",
                    FieldErrorKind::InvalidFormat,
                    "Invalid status",
                ));
                CopyStatus::default()
            }
        }
    };

    let due_back =
        parse_optional_date("due_back", &input.due_back, "due back date", &mut errors);

    // 已借出的副本必须有应还日期
    if status == CopyStatus::Loaned && due_back.is_none() && input.due_back.trim().is_empty() {
        errors.push(FieldError::new(
            "due_back",
            FieldErrorKind::Required,
            "Due back date must be specified for a loaned copy",
        ));
    }

    let draft = BookInstanceDraft {
        book,
        imprint: sanitize(&input.imprint),
        status,
        due_back,
    };

    if errors.is_empty() {
        if let Some(book) = draft.book {
            return Validated::Valid(BookInstanceFields {
                book,
                imprint: draft.imprint,
                status: draft.status,
                due_back: draft.due_back,
            });
        }
    }

    Validated::Invalid { draft, errors }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn errors_of<F, D>(validated: &Validated<F, D>) -> &[FieldError] {
        match validated {
            Validated::Valid(_) => &[],
            Validated::Invalid { errors, .. } => errors,
        }
    }

    #[test]
    fn test_sanitize_trims_and_escapes() {
        assert_eq!(sanitize("  Tolkien  "), "Tolkien");
        assert_eq!(
            sanitize("<b>\"War & Peace\"</b>"),
            "&lt;b&gt;&quot;War &amp; Peace&quot;&lt;/b&gt;"
        );
        assert_eq!(sanitize("O'Brian"), "O&#x27;Brian");
    }

    #[test]
    fn test_author_valid_payload() {
        let input = AuthorInput {
            first_name: " John ".into(),
            family_name: "Tolkien".into(),
            date_of_birth: "1892-01-03".into(),
            date_of_death: String::new(),
        };
        match validate_author(&input) {
            Validated::Valid(fields) => {
                assert_eq!(fields.first_name, "John");
                assert_eq!(
                    fields.date_of_birth,
                    chrono::NaiveDate::from_ymd_opt(1892, 1, 3)
                );
                assert_eq!(fields.date_of_death, None);
            }
            Validated::Invalid { errors, .. } => panic!("unexpected errors: {:?}", errors),
        }
    }

    #[test]
    fn test_author_empty_first_name_is_single_required_error() {
        let input = AuthorInput {
            first_name: String::new(),
            family_name: "Tolkien".into(),
            ..Default::default()
        };
        let validated = validate_author(&input);
        let errors = errors_of(&validated);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "first_name");
        assert_eq!(errors[0].kind, FieldErrorKind::Required);
    }

    #[test]
    fn test_author_errors_do_not_short_circuit() {
        let input = AuthorInput {
            first_name: String::new(),
            family_name: "x".repeat(101),
            date_of_birth: "03/01/1892".into(),
            ..Default::default()
        };
        let validated = validate_author(&input);
        let errors = errors_of(&validated);
        assert_eq!(errors.len(), 3);
        assert!(errors.iter().any(|e| e.field == "first_name"
            && e.kind == FieldErrorKind::Required));
        assert!(errors.iter().any(|e| e.field == "family_name"
            && e.kind == FieldErrorKind::LengthOutOfRange));
        assert!(errors.iter().any(|e| e.field == "date_of_birth"
            && e.kind == FieldErrorKind::InvalidFormat));
    }

    #[test]
    fn test_author_draft_is_sanitized_on_error_path() {
        let input = AuthorInput {
            first_name: "  <John>  ".into(),
            family_name: String::new(),
            ..Default::default()
        };
        match validate_author(&input) {
            Validated::Invalid { draft, .. } => {
                assert_eq!(draft.first_name, "&lt;John&gt;");
            }
            Validated::Valid(_) => panic!("expected errors"),
        }
    }

    #[test]
    fn test_genre_length_bounds_enforced() {
        let too_short = GenreInput {
            name: "Sf".into(),
            category: String::new(),
        };
        let errors_short = match validate_genre(&too_short) {
            Validated::Invalid { errors, .. } => errors,
            Validated::Valid(_) => panic!("expected errors"),
        };
        assert_eq!(errors_short.len(), 1);
        assert_eq!(errors_short[0].kind, FieldErrorKind::LengthOutOfRange);

        let ok = GenreInput {
            name: "Fantasy".into(),
            category: "  Fiction ".into(),
        };
        match validate_genre(&ok) {
            Validated::Valid(fields) => {
                assert_eq!(fields.name, "Fantasy");
                assert_eq!(fields.category.as_deref(), Some("Fiction"));
            }
            Validated::Invalid { errors, .. } => panic!("unexpected errors: {:?}", errors),
        }
    }

    #[test]
    fn test_genre_empty_name_is_required_not_length() {
        let input = GenreInput::default();
        let validated = validate_genre(&input);
        let errors = errors_of(&validated);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, FieldErrorKind::Required);
    }

    #[test]
    fn test_book_requires_author_reference() {
        let input = BookInput {
            title: "The Hobbit".into(),
            summary: "There and back again".into(),
            isbn: "9780261103283".into(),
            author: String::new(),
            genres: vec![],
        };
        let validated = validate_book(&input);
        let errors = errors_of(&validated);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "author");
        assert_eq!(errors[0].kind, FieldErrorKind::Required);
    }

    #[test]
    fn test_book_garbage_author_reference_is_invalid_format() {
        let input = BookInput {
            title: "The Hobbit".into(),
            summary: "There and back again".into(),
            isbn: "9780261103283".into(),
            author: "not-a-uuid".into(),
            genres: vec![],
        };
        let validated = validate_book(&input);
        let errors = errors_of(&validated);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].kind, FieldErrorKind::InvalidFormat);
    }

    #[test]
    fn test_book_accepts_zero_or_more_genres() {
        let author = Uuid::new_v4().to_string();
        let genre = Uuid::new_v4().to_string();
        let input = BookInput {
            title: "The Hobbit".into(),
            summary: "There and back again".into(),
            isbn: "9780261103283".into(),
            author: author.clone(),
            genres: vec![genre.clone(), String::new()],
        };
        match validate_book(&input) {
            Validated::Valid(fields) => {
                assert_eq!(fields.author.to_string(), author);
                assert_eq!(fields.genres.len(), 1);
                assert_eq!(fields.genres[0].to_string(), genre);
            }
            Validated::Invalid { errors, .. } => panic!("unexpected errors: {:?}", errors),
        }
    }

    #[test]
    fn test_book_duplicate_genre_references_collapse() {
        let first = Uuid::new_v4().to_string();
        let second = Uuid::new_v4().to_string();
        let input = BookInput {
            title: "The Hobbit".into(),
            summary: "There and back again".into(),
            isbn: "9780261103283".into(),
            author: Uuid::new_v4().to_string(),
            genres: vec![first.clone(), second.clone(), first.clone()],
        };
        match validate_book(&input) {
            Validated::Valid(fields) => {
                assert_eq!(fields.genres.len(), 2);
                assert_eq!(fields.genres[0].to_string(), first);
                assert_eq!(fields.genres[1].to_string(), second);
            }
            Validated::Invalid { errors, .. } => panic!("unexpected errors: {:?}", errors),
        }
    }

    #[test]
    fn test_book_instance_available_without_due_back_is_valid() {
        let input = BookInstanceInput {
            book: Uuid::new_v4().to_string(),
            imprint: "2016, Pearson".into(),
            status: "Available".into(),
            due_back: String::new(),
        };
        match validate_book_instance(&input) {
            Validated::Valid(fields) => {
                assert_eq!(fields.imprint, "2016, Pearson");
                assert_eq!(fields.status, CopyStatus::Available);
                assert_eq!(fields.due_back, None);
            }
            Validated::Invalid { errors, .. } => panic!("unexpected errors: {:?}", errors),
        }
    }

    #[test]
    fn test_book_instance_loaned_requires_due_back() {
        let input = BookInstanceInput {
            book: Uuid::new_v4().to_string(),
            imprint: "2016, Pearson".into(),
            status: "Loaned".into(),
            due_back: String::new(),
        };
        let validated = validate_book_instance(&input);
        let errors = errors_of(&validated);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "due_back");
        assert_eq!(errors[0].kind, FieldErrorKind::Required);
    }

    #[test]
    fn test_book_instance_unknown_status_is_invalid_format() {
        let input = BookInstanceInput {
            book: Uuid::new_v4().to_string(),
            imprint: "2016, Pearson".into(),
            status: "Lost".into(),
            due_back: String::new(),
        };
        let validated = validate_book_instance(&input);
        let errors = errors_of(&validated);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "status");
        assert_eq!(errors[0].kind, FieldErrorKind::InvalidFormat);
    }
}
