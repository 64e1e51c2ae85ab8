//! BookInstance Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateBookInstance, DeleteBookInstance, UpdateBookInstance};
use crate::application::error::WorkflowError;
use crate::application::ports::{BookInstanceRepositoryPort, BookRepositoryPort};
use crate::application::validation::{
    validate_book_instance, BookInstanceDraft, FieldError, Validated,
};
use crate::domain::catalog::{book_instance_list_path, Book};

// ============================================================================
// CreateBookInstance
// ============================================================================

/// 创建副本的结局。回显时重新取全量图书列表供表单选择。
#[derive(Debug, Clone)]
pub enum CreateBookInstanceOutcome {
    Redirect(String),
    Redisplay {
        draft: BookInstanceDraft,
        errors: Vec<FieldError>,
        books: Vec<Book>,
    },
}

/// CreateBookInstance Handler
pub struct CreateBookInstanceHandler {
    instances: Arc<dyn BookInstanceRepositoryPort>,
    books: Arc<dyn BookRepositoryPort>,
}

impl CreateBookInstanceHandler {
    pub fn new(
        instances: Arc<dyn BookInstanceRepositoryPort>,
        books: Arc<dyn BookRepositoryPort>,
    ) -> Self {
        Self { instances, books }
    }

    pub async fn handle(
        &self,
        command: CreateBookInstance,
    ) -> Result<CreateBookInstanceOutcome, WorkflowError> {
        match validate_book_instance(&command.input) {
            Validated::Invalid { draft, errors } => {
                let books = self.books.find_all().await?;
                Ok(CreateBookInstanceOutcome::Redisplay {
                    draft,
                    errors,
                    books,
                })
            }
            Validated::Valid(fields) => {
                let instance = self.instances.create(fields).await?;

                tracing::info!(
                    instance_id = %instance.id,
                    book_id = %instance.book,
                    status = instance.status.as_str(),
                    "Book instance created"
                );

                Ok(CreateBookInstanceOutcome::Redirect(
                    instance.canonical_path(),
                ))
            }
        }
    }
}

// ============================================================================
// UpdateBookInstance
// ============================================================================

/// 更新副本的结局
#[derive(Debug, Clone)]
pub enum UpdateBookInstanceOutcome {
    Redirect(String),
    Redisplay {
        draft: BookInstanceDraft,
        errors: Vec<FieldError>,
        books: Vec<Book>,
    },
}

/// UpdateBookInstance Handler
pub struct UpdateBookInstanceHandler {
    instances: Arc<dyn BookInstanceRepositoryPort>,
    books: Arc<dyn BookRepositoryPort>,
}

impl UpdateBookInstanceHandler {
    pub fn new(
        instances: Arc<dyn BookInstanceRepositoryPort>,
        books: Arc<dyn BookRepositoryPort>,
    ) -> Self {
        Self { instances, books }
    }

    pub async fn handle(
        &self,
        command: UpdateBookInstance,
    ) -> Result<UpdateBookInstanceOutcome, WorkflowError> {
        match validate_book_instance(&command.input) {
            Validated::Invalid { draft, errors } => {
                let books = self.books.find_all().await?;
                Ok(UpdateBookInstanceOutcome::Redisplay {
                    draft,
                    errors,
                    books,
                })
            }
            Validated::Valid(fields) => {
                let instance = self
                    .instances
                    .replace(command.instance_id, fields)
                    .await
                    .map_err(|e| {
                        WorkflowError::from_repo(
                            "BookInstance",
                            *command.instance_id.as_uuid(),
                            e,
                        )
                    })?;

                tracing::info!(instance_id = %instance.id, "Book instance updated");

                Ok(UpdateBookInstanceOutcome::Redirect(
                    instance.canonical_path(),
                ))
            }
        }
    }
}

// ============================================================================
// DeleteBookInstance
// ============================================================================

/// DeleteBookInstance Handler（无条件删除，结果幂等）
pub struct DeleteBookInstanceHandler {
    instances: Arc<dyn BookInstanceRepositoryPort>,
}

impl DeleteBookInstanceHandler {
    pub fn new(instances: Arc<dyn BookInstanceRepositoryPort>) -> Self {
        Self { instances }
    }

    pub async fn handle(&self, command: DeleteBookInstance) -> Result<String, WorkflowError> {
        let removed = self.instances.delete(command.instance_id).await?;

        tracing::info!(
            instance_id = %command.instance_id,
            removed = removed,
            "Book instance delete requested"
        );

        Ok(book_instance_list_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::AuthorRepositoryPort;
    use crate::application::validation::BookInstanceInput;
    use crate::domain::catalog::{AuthorFields, BookFields, CopyStatus};
    use crate::infrastructure::memory::{
        InMemoryAuthorRepository, InMemoryBookInstanceRepository, InMemoryBookRepository,
    };

    async fn seeded_book() -> (
        Arc<InMemoryBookInstanceRepository>,
        Arc<InMemoryBookRepository>,
        crate::domain::catalog::Book,
    ) {
        let instances = Arc::new(InMemoryBookInstanceRepository::new());
        let books = Arc::new(InMemoryBookRepository::new());
        let authors = InMemoryAuthorRepository::new();
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
        (instances, books, book)
    }

    #[tokio::test]
    async fn test_create_available_copy_without_due_back() {
        let (instances, books, book) = seeded_book().await;
        let handler = CreateBookInstanceHandler::new(instances.clone(), books);

        let outcome = handler
            .handle(CreateBookInstance {
                input: BookInstanceInput {
                    book: book.id.to_string(),
                    imprint: "2016, Pearson".into(),
                    status: "Available".into(),
                    due_back: String::new(),
                },
            })
            .await
            .unwrap();

        assert!(matches!(outcome, CreateBookInstanceOutcome::Redirect(_)));
        let stored = instances.find_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].imprint, "2016, Pearson");
        assert_eq!(stored[0].status, CopyStatus::Available);
        assert_eq!(stored[0].due_back_formatted(), "");
    }

    #[tokio::test]
    async fn test_create_invalid_copy_redisplays_with_book_list() {
        let (instances, books, _book) = seeded_book().await;
        let handler = CreateBookInstanceHandler::new(instances.clone(), books);

        let outcome = handler
            .handle(CreateBookInstance {
                input: BookInstanceInput {
                    book: String::new(),
                    imprint: String::new(),
                    status: "Available".into(),
                    due_back: String::new(),
                },
            })
            .await
            .unwrap();

        match outcome {
            CreateBookInstanceOutcome::Redisplay { errors, books, .. } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(books.len(), 1);
            }
            other => panic!("expected redisplay, got {:?}", other),
        }
        assert!(instances.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_copy_preserves_id() {
        let (instances, books, book) = seeded_book().await;
        let instance = instances
            .create(crate::domain::catalog::BookInstanceFields {
                book: book.id,
                imprint: "2016, Pearson".into(),
                status: CopyStatus::Available,
                due_back: None,
            })
            .await
            .unwrap();

        let handler = UpdateBookInstanceHandler::new(instances.clone(), books);
        let outcome = handler
            .handle(UpdateBookInstance {
                instance_id: instance.id,
                input: BookInstanceInput {
                    book: book.id.to_string(),
                    imprint: "2016, Pearson".into(),
                    status: "Loaned".into(),
                    due_back: "2024-03-15".into(),
                },
            })
            .await
            .unwrap();

        match outcome {
            UpdateBookInstanceOutcome::Redirect(path) => {
                assert_eq!(path, format!("/catalog/bookinstance/{}", instance.id));
            }
            other => panic!("expected redirect, got {:?}", other),
        }
        let stored = instances.find_by_id(instance.id).await.unwrap().unwrap();
        assert_eq!(stored.status, CopyStatus::Loaned);
        assert_eq!(stored.due_back_formatted(), "Mar 15, 2024");
    }

    #[tokio::test]
    async fn test_delete_copy_redirects_to_list() {
        let (instances, _books, _book) = seeded_book().await;
        let handler = DeleteBookInstanceHandler::new(instances);

        let path = handler
            .handle(DeleteBookInstance {
                instance_id: crate::domain::catalog::BookInstanceId::new(),
            })
            .await
            .unwrap();

        assert_eq!(path, "/catalog/bookinstances");
    }
}
