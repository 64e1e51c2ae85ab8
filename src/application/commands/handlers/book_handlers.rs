//! Book Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateBook, DeleteBook, UpdateBook};
use crate::application::error::WorkflowError;
use crate::application::ports::{
    AuthorRepositoryPort, BookRepositoryPort, GenreRepositoryPort,
};
use crate::application::validation::{validate_book, BookDraft, FieldError, Validated};
use crate::domain::catalog::{book_list_path, Author, Genre};

// ============================================================================
// CreateBook
// ============================================================================

/// 创建图书的结局。回显时重新取全量作者/类目列表供表单选择。
#[derive(Debug, Clone)]
pub enum CreateBookOutcome {
    Redirect(String),
    Redisplay {
        draft: BookDraft,
        errors: Vec<FieldError>,
        authors: Vec<Author>,
        genres: Vec<Genre>,
    },
}

/// CreateBook Handler
pub struct CreateBookHandler {
    books: Arc<dyn BookRepositoryPort>,
    authors: Arc<dyn AuthorRepositoryPort>,
    genres: Arc<dyn GenreRepositoryPort>,
}

impl CreateBookHandler {
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

    pub async fn handle(&self, command: CreateBook) -> Result<CreateBookOutcome, WorkflowError> {
        match validate_book(&command.input) {
            Validated::Invalid { draft, errors } => {
                // 两条辅助列表相互独立，并发取，任一失败整体失败
                let (authors, genres) =
                    tokio::try_join!(self.authors.find_all(), self.genres.find_all())?;
                Ok(CreateBookOutcome::Redisplay {
                    draft,
                    errors,
                    authors,
                    genres,
                })
            }
            Validated::Valid(fields) => {
                let book = self.books.create(fields).await?;

                tracing::info!(book_id = %book.id, title = %book.title, "Book created");

                Ok(CreateBookOutcome::Redirect(book.canonical_path()))
            }
        }
    }
}

// ============================================================================
// UpdateBook
// ============================================================================

/// 更新图书的结局
#[derive(Debug, Clone)]
pub enum UpdateBookOutcome {
    Redirect(String),
    Redisplay {
        draft: BookDraft,
        errors: Vec<FieldError>,
        authors: Vec<Author>,
        genres: Vec<Genre>,
    },
}

/// UpdateBook Handler
pub struct UpdateBookHandler {
    books: Arc<dyn BookRepositoryPort>,
    authors: Arc<dyn AuthorRepositoryPort>,
    genres: Arc<dyn GenreRepositoryPort>,
}

impl UpdateBookHandler {
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

    pub async fn handle(&self, command: UpdateBook) -> Result<UpdateBookOutcome, WorkflowError> {
        match validate_book(&command.input) {
            Validated::Invalid { draft, errors } => {
                let (authors, genres) =
                    tokio::try_join!(self.authors.find_all(), self.genres.find_all())?;
                Ok(UpdateBookOutcome::Redisplay {
                    draft,
                    errors,
                    authors,
                    genres,
                })
            }
            Validated::Valid(fields) => {
                let book = self
                    .books
                    .replace(command.book_id, fields)
                    .await
                    .map_err(|e| {
                        WorkflowError::from_repo("Book", *command.book_id.as_uuid(), e)
                    })?;

                tracing::info!(book_id = %book.id, "Book updated");

                Ok(UpdateBookOutcome::Redirect(book.canonical_path()))
            }
        }
    }
}

// ============================================================================
// DeleteBook
// ============================================================================

/// DeleteBook Handler（无条件删除，结果幂等）
pub struct DeleteBookHandler {
    books: Arc<dyn BookRepositoryPort>,
}

impl DeleteBookHandler {
    pub fn new(books: Arc<dyn BookRepositoryPort>) -> Self {
        Self { books }
    }

    pub async fn handle(&self, command: DeleteBook) -> Result<String, WorkflowError> {
        let removed = self.books.delete(command.book_id).await?;

        tracing::info!(
            book_id = %command.book_id,
            removed = removed,
            "Book delete requested"
        );

        Ok(book_list_path().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::validation::BookInput;
    use crate::domain::catalog::{AuthorFields, GenreFields};
    use crate::infrastructure::memory::{
        InMemoryAuthorRepository, InMemoryBookRepository, InMemoryGenreRepository,
    };

    async fn seeded_repos() -> (
        Arc<InMemoryBookRepository>,
        Arc<InMemoryAuthorRepository>,
        Arc<InMemoryGenreRepository>,
        crate::domain::catalog::Author,
        crate::domain::catalog::Genre,
    ) {
        let books = Arc::new(InMemoryBookRepository::new());
        let authors = Arc::new(InMemoryAuthorRepository::new());
        let genres = Arc::new(InMemoryGenreRepository::new());
        let author = authors
            .create(AuthorFields {
                first_name: "John".into(),
                family_name: "Tolkien".into(),
                date_of_birth: None,
                date_of_death: None,
            })
            .await
            .unwrap();
        let genre = genres
            .create(GenreFields {
                name: "Fantasy".into(),
                category: None,
            })
            .await
            .unwrap();
        (books, authors, genres, author, genre)
    }

    #[tokio::test]
    async fn test_create_book_redirects_to_canonical_path() {
        let (books, authors, genres, author, genre) = seeded_repos().await;
        let handler = CreateBookHandler::new(books.clone(), authors, genres);

        let outcome = handler
            .handle(CreateBook {
                input: BookInput {
                    title: "The Hobbit".into(),
                    author: author.id.to_string(),
                    summary: "There and back again".into(),
                    isbn: "9780261103283".into(),
                    genres: vec![genre.id.to_string()],
                },
            })
            .await
            .unwrap();

        let stored = books.find_all().await.unwrap();
        assert_eq!(stored.len(), 1);
        match outcome {
            CreateBookOutcome::Redirect(path) => {
                assert_eq!(path, stored[0].canonical_path());
            }
            other => panic!("expected redirect, got {:?}", other),
        }
        assert_eq!(stored[0].genres, vec![genre.id]);
    }

    #[tokio::test]
    async fn test_create_book_redisplay_refetches_auxiliary_lists() {
        let (books, authors, genres, _author, _genre) = seeded_repos().await;
        let handler = CreateBookHandler::new(books.clone(), authors, genres);

        let outcome = handler
            .handle(CreateBook {
                input: BookInput {
                    title: String::new(),
                    author: String::new(),
                    summary: "s".into(),
                    isbn: "i".into(),
                    genres: vec![],
                },
            })
            .await
            .unwrap();

        match outcome {
            CreateBookOutcome::Redisplay {
                errors,
                authors,
                genres,
                ..
            } => {
                assert_eq!(errors.len(), 2);
                assert_eq!(authors.len(), 1);
                assert_eq!(genres.len(), 1);
            }
            other => panic!("expected redisplay, got {:?}", other),
        }
        assert!(books.find_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_book_replaces_all_mutable_fields() {
        let (books, authors, genres, author, genre) = seeded_repos().await;
        let book = books
            .create(crate::domain::catalog::BookFields {
                title: "The Hobbit".into(),
                author: author.id,
                summary: "There and back again".into(),
                isbn: "9780261103283".into(),
                genres: vec![genre.id],
            })
            .await
            .unwrap();

        let handler = UpdateBookHandler::new(books.clone(), authors, genres);
        let outcome = handler
            .handle(UpdateBook {
                book_id: book.id,
                input: BookInput {
                    title: "The Silmarillion".into(),
                    author: author.id.to_string(),
                    summary: "Tales of the Elder Days".into(),
                    isbn: "9780261102736".into(),
                    genres: vec![],
                },
            })
            .await
            .unwrap();

        match outcome {
            UpdateBookOutcome::Redirect(path) => {
                assert_eq!(path, format!("/catalog/book/{}", book.id));
            }
            other => panic!("expected redirect, got {:?}", other),
        }
        let stored = books.find_by_id(book.id).await.unwrap().unwrap();
        assert_eq!(stored.title, "The Silmarillion");
        assert!(stored.genres.is_empty());
    }

    #[tokio::test]
    async fn test_delete_book_redirects_to_list() {
        let (books, _authors, _genres, _author, _genre) = seeded_repos().await;
        let handler = DeleteBookHandler::new(books);

        let path = handler
            .handle(DeleteBook {
                book_id: crate::domain::catalog::BookId::new(),
            })
            .await
            .unwrap();

        assert_eq!(path, "/catalog/books");
    }
}
