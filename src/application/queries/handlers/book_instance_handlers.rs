//! BookInstance Query Handlers

use std::sync::Arc;

use crate::application::error::WorkflowError;
use crate::application::ports::{BookInstanceRepositoryPort, BookRepositoryPort};
use crate::application::queries::{
    GetBookInstance, GetBookInstanceCreateForm, GetBookInstanceDeleteConfirm,
    GetBookInstanceUpdateForm, ListBookInstances,
};
use crate::application::resolver::{PopulatedBookInstance, Resolver};
use crate::application::validation::BookInstanceDraft;
use crate::domain::catalog::Book;

// ============================================================================
// 视图
// ============================================================================

/// 副本视图：book 引用已展开，应还日期读取时格式化
#[derive(Debug, Clone)]
pub struct BookInstanceView {
    pub instance: PopulatedBookInstance,
    pub due_back_formatted: String,
    pub url: String,
}

impl From<PopulatedBookInstance> for BookInstanceView {
    fn from(populated: PopulatedBookInstance) -> Self {
        Self {
            due_back_formatted: populated.instance.due_back_formatted(),
            url: populated.instance.canonical_path(),
            instance: populated,
        }
    }
}

/// 副本表单视图：草稿 + 图书辅助列表
#[derive(Debug, Clone)]
pub struct BookInstanceFormView {
    pub draft: BookInstanceDraft,
    pub books: Vec<Book>,
}

// ============================================================================
// ListBookInstances
// ============================================================================

/// ListBookInstances Handler
pub struct ListBookInstancesHandler {
    instances: Arc<dyn BookInstanceRepositoryPort>,
    resolver: Arc<Resolver>,
}

impl ListBookInstancesHandler {
    pub fn new(instances: Arc<dyn BookInstanceRepositoryPort>, resolver: Arc<Resolver>) -> Self {
        Self {
            instances,
            resolver,
        }
    }

    pub async fn handle(
        &self,
        _query: ListBookInstances,
    ) -> Result<Vec<BookInstanceView>, WorkflowError> {
        let instances = self.instances.find_all().await?;
        let populated = self.resolver.populate_book_instances(instances).await?;
        Ok(populated.into_iter().map(BookInstanceView::from).collect())
    }
}

// ============================================================================
// GetBookInstance
// ============================================================================

/// GetBookInstance Handler
pub struct GetBookInstanceHandler {
    instances: Arc<dyn BookInstanceRepositoryPort>,
    resolver: Arc<Resolver>,
}

impl GetBookInstanceHandler {
    pub fn new(instances: Arc<dyn BookInstanceRepositoryPort>, resolver: Arc<Resolver>) -> Self {
        Self {
            instances,
            resolver,
        }
    }

    pub async fn handle(
        &self,
        query: GetBookInstance,
    ) -> Result<BookInstanceView, WorkflowError> {
        let instance = self
            .instances
            .find_by_id(query.instance_id)
            .await?
            .ok_or_else(|| {
                WorkflowError::not_found("BookInstance", *query.instance_id.as_uuid())
            })?;

        let populated = self.resolver.populate_book_instance(instance).await?;
        Ok(BookInstanceView::from(populated))
    }
}

// ============================================================================
// 表单
// ============================================================================

/// GetBookInstanceCreateForm Handler
pub struct GetBookInstanceCreateFormHandler {
    books: Arc<dyn BookRepositoryPort>,
}

impl GetBookInstanceCreateFormHandler {
    pub fn new(books: Arc<dyn BookRepositoryPort>) -> Self {
        Self { books }
    }

    pub async fn handle(
        &self,
        _query: GetBookInstanceCreateForm,
    ) -> Result<BookInstanceFormView, WorkflowError> {
        let books = self.books.find_all().await?;

        Ok(BookInstanceFormView {
            draft: BookInstanceDraft::default(),
            books,
        })
    }
}

/// GetBookInstanceUpdateForm Handler
pub struct GetBookInstanceUpdateFormHandler {
    instances: Arc<dyn BookInstanceRepositoryPort>,
    books: Arc<dyn BookRepositoryPort>,
}

impl GetBookInstanceUpdateFormHandler {
    pub fn new(
        instances: Arc<dyn BookInstanceRepositoryPort>,
        books: Arc<dyn BookRepositoryPort>,
    ) -> Self {
        Self { instances, books }
    }

    /// 目标记录与图书辅助列表相互独立，并发取
    pub async fn handle(
        &self,
        query: GetBookInstanceUpdateForm,
    ) -> Result<BookInstanceFormView, WorkflowError> {
        let (instance, books) = tokio::try_join!(
            async {
                self.instances
                    .find_by_id(query.instance_id)
                    .await?
                    .ok_or_else(|| {
                        WorkflowError::not_found("BookInstance", *query.instance_id.as_uuid())
                    })
            },
            async { Ok(self.books.find_all().await?) }
        )?;

        Ok(BookInstanceFormView {
            draft: BookInstanceDraft::from(instance.fields()),
            books,
        })
    }
}

/// GetBookInstanceDeleteConfirm Handler
pub struct GetBookInstanceDeleteConfirmHandler {
    instances: Arc<dyn BookInstanceRepositoryPort>,
    resolver: Arc<Resolver>,
}

impl GetBookInstanceDeleteConfirmHandler {
    pub fn new(instances: Arc<dyn BookInstanceRepositoryPort>, resolver: Arc<Resolver>) -> Self {
        Self {
            instances,
            resolver,
        }
    }

    pub async fn handle(
        &self,
        query: GetBookInstanceDeleteConfirm,
    ) -> Result<BookInstanceView, WorkflowError> {
        let instance = self
            .instances
            .find_by_id(query.instance_id)
            .await?
            .ok_or_else(|| {
                WorkflowError::not_found("BookInstance", *query.instance_id.as_uuid())
            })?;

        let populated = self.resolver.populate_book_instance(instance).await?;
        Ok(BookInstanceView::from(populated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::AuthorRepositoryPort;
    use crate::domain::catalog::{
        AuthorFields, BookFields, BookInstance, BookInstanceFields, BookInstanceId, CopyStatus,
    };
    use crate::infrastructure::memory::{
        InMemoryAuthorRepository, InMemoryBookInstanceRepository, InMemoryBookRepository,
        InMemoryGenreRepository,
    };
    use chrono::NaiveDate;

    struct Fixture {
        books: Arc<InMemoryBookRepository>,
        instances: Arc<InMemoryBookInstanceRepository>,
        resolver: Arc<Resolver>,
    }

    async fn fixture() -> (Fixture, Book) {
        let authors = Arc::new(InMemoryAuthorRepository::new());
        let genres = Arc::new(InMemoryGenreRepository::new());
        let books = Arc::new(InMemoryBookRepository::new());
        let instances = Arc::new(InMemoryBookInstanceRepository::new());
        let resolver = Arc::new(Resolver::new(
            authors.clone(),
            genres.clone(),
            books.clone(),
        ));

        let author = authors
            .create(AuthorFields {
                first_name: "John".into(),
                family_name: "Tolkien".into(),
                date_of_birth: None,
                date_of_death: None,
            })
            .await
            .unwrap();
        let book = books
            .create(BookFields {
                title: "The Hobbit".into(),
                author: author.id,
                summary: "There and back again".into(),
                isbn: "9780261103283".into(),
                genres: vec![],
            })
            .await
            .unwrap();

        (
            Fixture {
                books,
                instances,
                resolver,
            },
            book,
        )
    }

    async fn seed_instance(fx: &Fixture, book: &Book, due_back: Option<NaiveDate>) -> BookInstance {
        fx.instances
            .create(BookInstanceFields {
                book: book.id,
                imprint: "2016, Pearson".into(),
                status: CopyStatus::Loaned,
                due_back,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_list_instances_populates_book_and_formats_due_back() {
        let (fx, book) = fixture().await;
        seed_instance(&fx, &book, NaiveDate::from_ymd_opt(2024, 3, 15)).await;

        let handler = ListBookInstancesHandler::new(fx.instances.clone(), fx.resolver.clone());
        let views = handler.handle(ListBookInstances).await.unwrap();

        assert_eq!(views.len(), 1);
        assert_eq!(views[0].instance.book.title, "The Hobbit");
        assert_eq!(views[0].due_back_formatted, "Mar 15, 2024");
    }

    #[tokio::test]
    async fn test_get_instance_missing_is_not_found() {
        let (fx, _book) = fixture().await;
        let handler = GetBookInstanceHandler::new(fx.instances.clone(), fx.resolver.clone());

        let missing = BookInstanceId::new();
        match handler
            .handle(GetBookInstance {
                instance_id: missing,
            })
            .await
        {
            Err(WorkflowError::NotFound { resource_type, id }) => {
                assert_eq!(resource_type, "BookInstance");
                assert_eq!(id, *missing.as_uuid());
            }
            other => panic!("expected not found, got {:?}", other.map(|v| v.url)),
        }
    }

    #[tokio::test]
    async fn test_update_form_backfills_draft_and_book_list() {
        let (fx, book) = fixture().await;
        let instance = seed_instance(&fx, &book, None).await;

        let handler =
            GetBookInstanceUpdateFormHandler::new(fx.instances.clone(), fx.books.clone());
        let form = handler
            .handle(GetBookInstanceUpdateForm {
                instance_id: instance.id,
            })
            .await
            .unwrap();

        assert_eq!(form.draft.book, Some(book.id));
        assert_eq!(form.draft.status, CopyStatus::Loaned);
        assert_eq!(form.books.len(), 1);
    }

    #[tokio::test]
    async fn test_create_form_defaults_to_maintenance() {
        let (fx, _book) = fixture().await;
        let handler = GetBookInstanceCreateFormHandler::new(fx.books.clone());

        let form = handler.handle(GetBookInstanceCreateForm).await.unwrap();
        assert_eq!(form.draft.status, CopyStatus::Maintenance);
        assert!(form.draft.book.is_none());
        assert_eq!(form.books.len(), 1);
    }
}
