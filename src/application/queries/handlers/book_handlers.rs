//! Book Query Handlers

use std::sync::Arc;

use crate::application::error::WorkflowError;
use crate::application::ports::{
    AuthorRepositoryPort, BookInstanceRepositoryPort, BookRepositoryPort, GenreRepositoryPort,
};
use crate::application::queries::{
    GetBook, GetBookCreateForm, GetBookDeleteConfirm, GetBookUpdateForm, ListBooks,
};
use crate::application::resolver::{PopulatedBook, Resolver};
use crate::application::validation::BookDraft;
use crate::domain::catalog::{Author, BookInstance, Genre};

// ============================================================================
// 视图
// ============================================================================

/// 图书列表/确认页视图：引用已展开
#[derive(Debug, Clone)]
pub struct BookView {
    pub book: PopulatedBook,
    pub url: String,
}

impl From<PopulatedBook> for BookView {
    fn from(populated: PopulatedBook) -> Self {
        Self {
            url: populated.book.canonical_path(),
            book: populated,
        }
    }
}

/// 图书详情视图：附带全部馆藏副本
#[derive(Debug, Clone)]
pub struct BookDetailView {
    pub book: BookView,
    pub instances: Vec<BookInstance>,
}

/// 图书表单视图：草稿 + 作者/类目辅助列表
#[derive(Debug, Clone)]
pub struct BookFormView {
    pub draft: BookDraft,
    pub authors: Vec<Author>,
    pub genres: Vec<Genre>,
}

// ============================================================================
// ListBooks
// ============================================================================

/// ListBooks Handler
pub struct ListBooksHandler {
    books: Arc<dyn BookRepositoryPort>,
    resolver: Arc<Resolver>,
}

impl ListBooksHandler {
    pub fn new(books: Arc<dyn BookRepositoryPort>, resolver: Arc<Resolver>) -> Self {
        Self { books, resolver }
    }

    pub async fn handle(&self, _query: ListBooks) -> Result<Vec<BookView>, WorkflowError> {
        let books = self.books.find_all().await?;
        let populated = self.resolver.populate_books(books).await?;
        Ok(populated.into_iter().map(BookView::from).collect())
    }
}

// ============================================================================
// GetBook
// ============================================================================

/// GetBook Handler
pub struct GetBookHandler {
    books: Arc<dyn BookRepositoryPort>,
    instances: Arc<dyn BookInstanceRepositoryPort>,
    resolver: Arc<Resolver>,
}

impl GetBookHandler {
    pub fn new(
        books: Arc<dyn BookRepositoryPort>,
        instances: Arc<dyn BookInstanceRepositoryPort>,
        resolver: Arc<Resolver>,
    ) -> Self {
        Self {
            books,
            instances,
            resolver,
        }
    }

    /// 先取图书本体，再并发展开引用、取副本列表
    pub async fn handle(&self, query: GetBook) -> Result<BookDetailView, WorkflowError> {
        let book = self
            .books
            .find_by_id(query.book_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Book", *query.book_id.as_uuid()))?;

        let (populated, instances) = tokio::try_join!(
            self.resolver.populate_book(book),
            async { Ok(self.instances.find_by_book(query.book_id).await?) }
        )?;

        Ok(BookDetailView {
            book: BookView::from(populated),
            instances,
        })
    }
}

// ============================================================================
// 表单
// ============================================================================

/// GetBookCreateForm Handler
pub struct GetBookCreateFormHandler {
    authors: Arc<dyn AuthorRepositoryPort>,
    genres: Arc<dyn GenreRepositoryPort>,
}

impl GetBookCreateFormHandler {
    pub fn new(
        authors: Arc<dyn AuthorRepositoryPort>,
        genres: Arc<dyn GenreRepositoryPort>,
    ) -> Self {
        Self { authors, genres }
    }

    pub async fn handle(&self, _query: GetBookCreateForm) -> Result<BookFormView, WorkflowError> {
        let (authors, genres) =
            tokio::try_join!(self.authors.find_all(), self.genres.find_all())?;

        Ok(BookFormView {
            draft: BookDraft::default(),
            authors,
            genres,
        })
    }
}

/// GetBookUpdateForm Handler
pub struct GetBookUpdateFormHandler {
    books: Arc<dyn BookRepositoryPort>,
    authors: Arc<dyn AuthorRepositoryPort>,
    genres: Arc<dyn GenreRepositoryPort>,
}

impl GetBookUpdateFormHandler {
    pub fn new(
        books: Arc<dyn BookRepositoryPort>,
        authors: Arc<dyn AuthorRepositoryPort>,
        genres: Arc<dyn GenreRepositoryPort>,
    ) -> Self {
        Self {
            books,
            authors,
            genres,
        }
    }

    /// 目标记录与两条辅助列表相互独立，三路并发取
    pub async fn handle(&self, query: GetBookUpdateForm) -> Result<BookFormView, WorkflowError> {
        let (book, authors, genres) = tokio::try_join!(
            async {
                self.books
                    .find_by_id(query.book_id)
                    .await?
                    .ok_or_else(|| WorkflowError::not_found("Book", *query.book_id.as_uuid()))
            },
            async { Ok(self.authors.find_all().await?) },
            async { Ok(self.genres.find_all().await?) }
        )?;

        Ok(BookFormView {
            draft: BookDraft::from(book.fields()),
            authors,
            genres,
        })
    }
}

/// GetBookDeleteConfirm Handler
pub struct GetBookDeleteConfirmHandler {
    books: Arc<dyn BookRepositoryPort>,
    resolver: Arc<Resolver>,
}

impl GetBookDeleteConfirmHandler {
    pub fn new(books: Arc<dyn BookRepositoryPort>, resolver: Arc<Resolver>) -> Self {
        Self { books, resolver }
    }

    pub async fn handle(&self, query: GetBookDeleteConfirm) -> Result<BookView, WorkflowError> {
        let book = self
            .books
            .find_by_id(query.book_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Book", *query.book_id.as_uuid()))?;

        let populated = self.resolver.populate_book(book).await?;
        Ok(BookView::from(populated))
    }
}
