//! Genre Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateGenre, DeleteGenre, UpdateGenre};
use crate::application::error::WorkflowError;
use crate::application::ports::GenreRepositoryPort;
use crate::application::validation::{validate_genre, FieldError, Validated};
use crate::domain::catalog::{genre_list_path, GenreFields};

// ============================================================================
// CreateGenre
// ============================================================================

/// 创建类目的结局
#[derive(Debug, Clone)]
pub enum CreateGenreOutcome {
    Redirect(String),
    Redisplay {
        draft: GenreFields,
        errors: Vec<FieldError>,
    },
}

/// CreateGenre Handler
pub struct CreateGenreHandler {
    genres: Arc<dyn GenreRepositoryPort>,
}

impl CreateGenreHandler {
    pub fn new(genres: Arc<dyn GenreRepositoryPort>) -> Self {
        Self { genres }
    }

    pub async fn handle(&self, command: CreateGenre) -> Result<CreateGenreOutcome, WorkflowError> {
        match validate_genre(&command.input) {
            Validated::Invalid { draft, errors } => {
                Ok(CreateGenreOutcome::Redisplay { draft, errors })
            }
            Validated::Valid(fields) => {
                let genre = self.genres.create(fields).await?;

                tracing::info!(genre_id = %genre.id, name = %genre.name, "Genre created");

                Ok(CreateGenreOutcome::Redirect(genre.canonical_path()))
            }
        }
    }
}

// ============================================================================
// UpdateGenre
// ============================================================================

/// 更新类目的结局
#[derive(Debug, Clone)]
pub enum UpdateGenreOutcome {
    Redirect(String),
    Redisplay {
        draft: GenreFields,
        errors: Vec<FieldError>,
    },
}

/// UpdateGenre Handler
pub struct UpdateGenreHandler {
    genres: Arc<dyn GenreRepositoryPort>,
}

impl UpdateGenreHandler {
    pub fn new(genres: Arc<dyn GenreRepositoryPort>) -> Self {
        Self { genres }
    }

    pub async fn handle(&self, command: UpdateGenre) -> Result<UpdateGenreOutcome, WorkflowError> {
        match validate_genre(&command.input) {
            Validated::Invalid { draft, errors } => {
                Ok(UpdateGenreOutcome::Redisplay { draft, errors })
            }
            Validated::Valid(fields) => {
                let genre = self
                    .genres
                    .replace(command.genre_id, fields)
                    .await
                    .map_err(|e| {
                        WorkflowError::from_repo("Genre", *command.genre_id.as_uuid(), e)
                    })?;

                tracing::info!(genre_id = %genre.id, "Genre updated");

                Ok(UpdateGenreOutcome::Redirect(genre.canonical_path()))
            }
        }
    }
}

// ============================================================================
// DeleteGenre
// ============================================================================

/// DeleteGenre Handler（无条件删除，结果幂等）
pub struct DeleteGenreHandler {
    genres: Arc<dyn GenreRepositoryPort>,
}

impl DeleteGenreHandler {
    pub fn new(genres: Arc<dyn GenreRepositoryPort>) -> Self {
        Self { genres }
    }

    pub async fn handle(&self, command: DeleteGenre) -> Result<String, WorkflowError> {
        let removed = self.genres.delete(command.genre_id).await?;

        tracing::info!(
            genre_id = %command.genre_id,
            removed = removed,
            "Genre delete requested"
        );

        Ok(genre_list_path().to_string())
    }
}
