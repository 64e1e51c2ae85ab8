//! 应用层 - 用例编排
//!
//! 包含：
//! - ports: 六边形架构端口定义（四类目录记录的 Repository）
//! - validation: 校验管线（清洗、字段规则、草稿回显）
//! - resolver: 引用解析器（population）
//! - commands: CQRS 命令及处理器
//! - queries: CQRS 查询及处理器
//! - error: 应用层错误定义

pub mod commands;
pub mod error;
pub mod ports;
pub mod queries;
pub mod resolver;
pub mod validation;

// Re-exports
pub use commands::{
    // Author commands
    CreateAuthor,
    DeleteAuthor,
    UpdateAuthor,
    // Book commands
    CreateBook,
    DeleteBook,
    UpdateBook,
    // BookInstance commands
    CreateBookInstance,
    DeleteBookInstance,
    UpdateBookInstance,
    // Genre commands
    CreateGenre,
    DeleteGenre,
    UpdateGenre,
    // Handlers
    handlers::{
        CreateAuthorHandler, CreateAuthorOutcome, CreateBookHandler, CreateBookInstanceHandler,
        CreateBookInstanceOutcome, CreateBookOutcome, CreateGenreHandler, CreateGenreOutcome,
        DeleteAuthorHandler, DeleteBookHandler, DeleteBookInstanceHandler, DeleteGenreHandler,
        UpdateAuthorHandler, UpdateAuthorOutcome, UpdateBookHandler, UpdateBookInstanceHandler,
        UpdateBookInstanceOutcome, UpdateBookOutcome, UpdateGenreHandler, UpdateGenreOutcome,
    },
};

pub use error::WorkflowError;

pub use ports::{
    AuthorRepositoryPort, BookInstanceRepositoryPort, BookRepositoryPort, GenreRepositoryPort,
    RepositoryError,
};

pub use resolver::{PopulatedBook, PopulatedBookInstance, Resolver};

pub use validation::{
    validate_author, validate_book, validate_book_instance, validate_genre, AuthorInput,
    BookDraft, BookInput, BookInstanceDraft, BookInstanceInput, FieldError, FieldErrorKind,
    GenreInput, Validated,
};

pub use queries::{
    // Author queries
    GetAuthor,
    GetAuthorCreateForm,
    GetAuthorDeleteConfirm,
    GetAuthorUpdateForm,
    ListAuthors,
    // Book queries
    GetBook,
    GetBookCreateForm,
    GetBookDeleteConfirm,
    GetBookUpdateForm,
    ListBooks,
    // BookInstance queries
    GetBookInstance,
    GetBookInstanceCreateForm,
    GetBookInstanceDeleteConfirm,
    GetBookInstanceUpdateForm,
    ListBookInstances,
    // Genre queries
    GetGenre,
    GetGenreCreateForm,
    GetGenreDeleteConfirm,
    GetGenreUpdateForm,
    ListGenres,
    // Handlers
    handlers::{
        AuthorDetailView, AuthorFormView, AuthorView, BookDetailView, BookFormView,
        BookInstanceFormView, BookInstanceView, BookView, GenreDetailView, GenreFormView,
        GenreView, GetAuthorCreateFormHandler, GetAuthorDeleteConfirmHandler, GetAuthorHandler,
        GetAuthorUpdateFormHandler, GetBookCreateFormHandler, GetBookDeleteConfirmHandler,
        GetBookHandler, GetBookInstanceCreateFormHandler, GetBookInstanceDeleteConfirmHandler,
        GetBookInstanceHandler, GetBookInstanceUpdateFormHandler, GetBookUpdateFormHandler,
        GetGenreCreateFormHandler, GetGenreDeleteConfirmHandler, GetGenreHandler,
        GetGenreUpdateFormHandler, ListAuthorsHandler, ListBookInstancesHandler,
        ListBooksHandler, ListGenresHandler,
    },
};
