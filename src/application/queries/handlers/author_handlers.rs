//! Author Query Handlers

use std::sync::Arc;

use crate::application::error::WorkflowError;
use crate::application::ports::{AuthorRepositoryPort, BookRepositoryPort};
use crate::application::queries::{
    GetAuthor, GetAuthorCreateForm, GetAuthorDeleteConfirm, GetAuthorUpdateForm, ListAuthors,
};
use crate::domain::catalog::{Author, AuthorFields, Book};

// ============================================================================
// 视图
// ============================================================================

/// 作者列表/确认页视图：派生字段读取时计算
#[derive(Debug, Clone)]
pub struct AuthorView {
    pub author: Author,
    pub name: String,
    pub lifespan: String,
    pub url: String,
}

impl From<Author> for AuthorView {
    fn from(author: Author) -> Self {
        Self {
            name: author.display_name(),
            lifespan: author.lifespan_label(),
            url: author.canonical_path(),
            author,
        }
    }
}

/// 作者详情视图：附带其名下全部图书
#[derive(Debug, Clone)]
pub struct AuthorDetailView {
    pub author: AuthorView,
    pub books: Vec<Book>,
}

/// 作者表单视图。创建时草稿为空，编辑时回填已存储字段。
#[derive(Debug, Clone)]
pub struct AuthorFormView {
    pub draft: AuthorFields,
}

// ============================================================================
// ListAuthors
// ============================================================================

/// ListAuthors Handler
pub struct ListAuthorsHandler {
    authors: Arc<dyn AuthorRepositoryPort>,
}

impl ListAuthorsHandler {
    pub fn new(authors: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { authors }
    }

    /// 按姓、名升序返回全部作者
    pub async fn handle(&self, _query: ListAuthors) -> Result<Vec<AuthorView>, WorkflowError> {
        let mut authors = self.authors.find_all().await?;
        authors.sort_by(|a, b| {
            a.family_name
                .cmp(&b.family_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
        });
        Ok(authors.into_iter().map(AuthorView::from).collect())
    }
}

// ============================================================================
// GetAuthor
// ============================================================================

/// GetAuthor Handler
pub struct GetAuthorHandler {
    authors: Arc<dyn AuthorRepositoryPort>,
    books: Arc<dyn BookRepositoryPort>,
}

impl GetAuthorHandler {
    pub fn new(authors: Arc<dyn AuthorRepositoryPort>, books: Arc<dyn BookRepositoryPort>) -> Self {
        Self { authors, books }
    }

    /// 作者本体与其图书列表相互独立，并发取
    pub async fn handle(&self, query: GetAuthor) -> Result<AuthorDetailView, WorkflowError> {
        let (author, books) = tokio::try_join!(
            async {
                self.authors
                    .find_by_id(query.author_id)
                    .await?
                    .ok_or_else(|| {
                        WorkflowError::not_found("Author", *query.author_id.as_uuid())
                    })
            },
            async { Ok(self.books.find_by_author(query.author_id).await?) }
        )?;

        Ok(AuthorDetailView {
            author: AuthorView::from(author),
            books,
        })
    }
}

// ============================================================================
// 表单
// ============================================================================

/// GetAuthorCreateForm Handler
pub struct GetAuthorCreateFormHandler;

impl GetAuthorCreateFormHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, _query: GetAuthorCreateForm) -> AuthorFormView {
        AuthorFormView {
            draft: AuthorFields::default(),
        }
    }
}

impl Default for GetAuthorCreateFormHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// GetAuthorUpdateForm Handler
pub struct GetAuthorUpdateFormHandler {
    authors: Arc<dyn AuthorRepositoryPort>,
}

impl GetAuthorUpdateFormHandler {
    pub fn new(authors: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { authors }
    }

    pub async fn handle(&self, query: GetAuthorUpdateForm) -> Result<AuthorFormView, WorkflowError> {
        let author = self
            .authors
            .find_by_id(query.author_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Author", *query.author_id.as_uuid()))?;

        Ok(AuthorFormView {
            draft: author.fields(),
        })
    }
}

/// GetAuthorDeleteConfirm Handler
pub struct GetAuthorDeleteConfirmHandler {
    authors: Arc<dyn AuthorRepositoryPort>,
}

impl GetAuthorDeleteConfirmHandler {
    pub fn new(authors: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { authors }
    }

    pub async fn handle(
        &self,
        query: GetAuthorDeleteConfirm,
    ) -> Result<AuthorView, WorkflowError> {
        let author = self
            .authors
            .find_by_id(query.author_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Author", *query.author_id.as_uuid()))?;

        Ok(AuthorView::from(author))
    }
}
