//! Genre Query Handlers

use std::sync::Arc;

use crate::application::error::WorkflowError;
use crate::application::ports::{BookRepositoryPort, GenreRepositoryPort};
use crate::application::queries::{
    GetGenre, GetGenreCreateForm, GetGenreDeleteConfirm, GetGenreUpdateForm, ListGenres,
};
use crate::domain::catalog::{Book, Genre, GenreFields};

// ============================================================================
// 视图
// ============================================================================

/// 类目列表/确认页视图
#[derive(Debug, Clone)]
pub struct GenreView {
    pub genre: Genre,
    pub url: String,
}

impl From<Genre> for GenreView {
    fn from(genre: Genre) -> Self {
        Self {
            url: genre.canonical_path(),
            genre,
        }
    }
}

/// 类目详情视图：附带该类目下全部图书
#[derive(Debug, Clone)]
pub struct GenreDetailView {
    pub genre: GenreView,
    pub books: Vec<Book>,
}

/// 类目表单视图
#[derive(Debug, Clone)]
pub struct GenreFormView {
    pub draft: GenreFields,
}

// ============================================================================
// ListGenres
// ============================================================================

/// ListGenres Handler
pub struct ListGenresHandler {
    genres: Arc<dyn GenreRepositoryPort>,
}

impl ListGenresHandler {
    pub fn new(genres: Arc<dyn GenreRepositoryPort>) -> Self {
        Self { genres }
    }

    pub async fn handle(&self, _query: ListGenres) -> Result<Vec<GenreView>, WorkflowError> {
        let genres = self.genres.find_all().await?;
        Ok(genres.into_iter().map(GenreView::from).collect())
    }
}

// ============================================================================
// GetGenre
// ============================================================================

/// GetGenre Handler
pub struct GetGenreHandler {
    genres: Arc<dyn GenreRepositoryPort>,
    books: Arc<dyn BookRepositoryPort>,
}

impl GetGenreHandler {
    pub fn new(genres: Arc<dyn GenreRepositoryPort>, books: Arc<dyn BookRepositoryPort>) -> Self {
        Self { genres, books }
    }

    /// 类目本体与其图书列表相互独立，并发取
    pub async fn handle(&self, query: GetGenre) -> Result<GenreDetailView, WorkflowError> {
        let (genre, books) = tokio::try_join!(
            async {
                self.genres
                    .find_by_id(query.genre_id)
                    .await?
                    .ok_or_else(|| WorkflowError::not_found("Genre", *query.genre_id.as_uuid()))
            },
            async { Ok(self.books.find_by_genre(query.genre_id).await?) }
        )?;

        Ok(GenreDetailView {
            genre: GenreView::from(genre),
            books,
        })
    }
}

// ============================================================================
// 表单
// ============================================================================

/// GetGenreCreateForm Handler
pub struct GetGenreCreateFormHandler;

impl GetGenreCreateFormHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn handle(&self, _query: GetGenreCreateForm) -> GenreFormView {
        GenreFormView {
            draft: GenreFields::default(),
        }
    }
}

impl Default for GetGenreCreateFormHandler {
    fn default() -> Self {
        Self::new()
    }
}

/// GetGenreUpdateForm Handler
pub struct GetGenreUpdateFormHandler {
    genres: Arc<dyn GenreRepositoryPort>,
}

impl GetGenreUpdateFormHandler {
    pub fn new(genres: Arc<dyn GenreRepositoryPort>) -> Self {
        Self { genres }
    }

    pub async fn handle(&self, query: GetGenreUpdateForm) -> Result<GenreFormView, WorkflowError> {
        let genre = self
            .genres
            .find_by_id(query.genre_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Genre", *query.genre_id.as_uuid()))?;

        Ok(GenreFormView {
            draft: genre.fields(),
        })
    }
}

/// GetGenreDeleteConfirm Handler
pub struct GetGenreDeleteConfirmHandler {
    genres: Arc<dyn GenreRepositoryPort>,
}

impl GetGenreDeleteConfirmHandler {
    pub fn new(genres: Arc<dyn GenreRepositoryPort>) -> Self {
        Self { genres }
    }

    pub async fn handle(
        &self,
        query: GetGenreDeleteConfirm,
    ) -> Result<GenreView, WorkflowError> {
        let genre = self
            .genres
            .find_by_id(query.genre_id)
            .await?
            .ok_or_else(|| WorkflowError::not_found("Genre", *query.genre_id.as_uuid()))?;

        Ok(GenreView::from(genre))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::AuthorRepositoryPort;
    use crate::domain::catalog::{AuthorFields, BookFields, GenreId};
    use crate::infrastructure::memory::{
        InMemoryAuthorRepository, InMemoryBookRepository, InMemoryGenreRepository,
    };

    #[tokio::test]
    async fn test_get_genre_detail_includes_books() {
        let genres = Arc::new(InMemoryGenreRepository::new());
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
        let fantasy = genres
            .create(GenreFields {
                name: "Fantasy".into(),
                category: None,
            })
            .await
            .unwrap();
        let scifi = genres
            .create(GenreFields {
                name: "Science Fiction".into(),
                category: None,
            })
            .await
            .unwrap();

        books
            .create(BookFields {
                title: "The Hobbit".into(),
                author: author.id,
                summary: "There and back again".into(),
                isbn: "9780261103283".into(),
                genres: vec![fantasy.id],
            })
            .await
            .unwrap();
        books
            .create(BookFields {
                title: "Dune".into(),
                author: author.id,
                summary: "Spice and sand".into(),
                isbn: "9780441013593".into(),
                genres: vec![scifi.id],
            })
            .await
            .unwrap();

        let handler = GetGenreHandler::new(genres, books);
        let detail = handler
            .handle(GetGenre {
                genre_id: fantasy.id,
            })
            .await
            .unwrap();

        assert_eq!(detail.genre.genre.name, "Fantasy");
        assert_eq!(detail.genre.url, format!("/catalog/genre/{}", fantasy.id));
        assert_eq!(detail.books.len(), 1);
        assert_eq!(detail.books[0].title, "The Hobbit");
    }

    #[tokio::test]
    async fn test_get_genre_missing_is_not_found() {
        let genres = Arc::new(InMemoryGenreRepository::new());
        let books = Arc::new(InMemoryBookRepository::new());
        let handler = GetGenreHandler::new(genres, books);

        let missing = GenreId::new();
        match handler.handle(GetGenre { genre_id: missing }).await {
            Err(WorkflowError::NotFound { resource_type, id }) => {
                assert_eq!(resource_type, "Genre");
                assert_eq!(id, *missing.as_uuid());
            }
            other => panic!(
                "expected not found, got {:?}",
                other.map(|d| d.genre.genre.name)
            ),
        }
    }

    #[tokio::test]
    async fn test_update_form_backfills_stored_fields() {
        let genres = Arc::new(InMemoryGenreRepository::new());
        let genre = genres
            .create(GenreFields {
                name: "Fantasy".into(),
                category: Some("Fiction".into()),
            })
            .await
            .unwrap();

        let handler = GetGenreUpdateFormHandler::new(genres);
        let form = handler
            .handle(GetGenreUpdateForm { genre_id: genre.id })
            .await
            .unwrap();

        assert_eq!(form.draft.name, "Fantasy");
        assert_eq!(form.draft.category.as_deref(), Some("Fiction"));
    }
}
