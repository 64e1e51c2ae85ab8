//! Author Command Handlers

use std::sync::Arc;

use crate::application::commands::{CreateAuthor, DeleteAuthor, UpdateAuthor};
use crate::application::error::WorkflowError;
use crate::application::ports::AuthorRepositoryPort;
use crate::application::validation::{validate_author, FieldError, Validated};
use crate::domain::catalog::{author_list_path, AuthorFields};

// ============================================================================
// CreateAuthor
// ============================================================================

/// 创建作者的结局
#[derive(Debug, Clone)]
pub enum CreateAuthorOutcome {
    /// 校验通过并已持久化，重定向到新记录的规范路径
    Redirect(String),
    /// 校验失败，携带净化后的草稿与全部违规回显表单
    Redisplay {
        draft: AuthorFields,
        errors: Vec<FieldError>,
    },
}

/// CreateAuthor Handler
pub struct CreateAuthorHandler {
    authors: Arc<dyn AuthorRepositoryPort>,
}

impl CreateAuthorHandler {
    pub fn new(authors: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { authors }
    }

    pub async fn handle(
        &self,
        command: CreateAuthor,
    ) -> Result<CreateAuthorOutcome, WorkflowError> {
        match validate_author(&command.input) {
            Validated::Invalid { draft, errors } => {
                Ok(CreateAuthorOutcome::Redisplay { draft, errors })
            }
            Validated::Valid(fields) => {
                let author = self.authors.create(fields).await?;

                tracing::info!(
                    author_id = %author.id,
                    name = %author.display_name(),
                    "Author created"
                );

                Ok(CreateAuthorOutcome::Redirect(author.canonical_path()))
            }
        }
    }
}

// ============================================================================
// UpdateAuthor
// ============================================================================

/// 更新作者的结局
#[derive(Debug, Clone)]
pub enum UpdateAuthorOutcome {
    Redirect(String),
    Redisplay {
        draft: AuthorFields,
        errors: Vec<FieldError>,
    },
}

/// UpdateAuthor Handler
pub struct UpdateAuthorHandler {
    authors: Arc<dyn AuthorRepositoryPort>,
}

impl UpdateAuthorHandler {
    pub fn new(authors: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { authors }
    }

    pub async fn handle(
        &self,
        command: UpdateAuthor,
    ) -> Result<UpdateAuthorOutcome, WorkflowError> {
        match validate_author(&command.input) {
            Validated::Invalid { draft, errors } => {
                Ok(UpdateAuthorOutcome::Redisplay { draft, errors })
            }
            Validated::Valid(fields) => {
                let author = self
                    .authors
                    .replace(command.author_id, fields)
                    .await
                    .map_err(|e| {
                        WorkflowError::from_repo("Author", *command.author_id.as_uuid(), e)
                    })?;

                tracing::info!(author_id = %author.id, "Author updated");

                Ok(UpdateAuthorOutcome::Redirect(author.canonical_path()))
            }
        }
    }
}

// ============================================================================
// DeleteAuthor
// ============================================================================

/// DeleteAuthor Handler
///
/// 删除无条件执行，不级联也不因存在引用而拦截；无论 ID 是否命中，
/// 一律重定向到列表页（对调用方幂等）。
pub struct DeleteAuthorHandler {
    authors: Arc<dyn AuthorRepositoryPort>,
}

impl DeleteAuthorHandler {
    pub fn new(authors: Arc<dyn AuthorRepositoryPort>) -> Self {
        Self { authors }
    }

    pub async fn handle(&self, command: DeleteAuthor) -> Result<String, WorkflowError> {
        let removed = self.authors.delete(command.author_id).await?;

        tracing::info!(
            author_id = %command.author_id,
            removed = removed,
            "Author delete requested"
        );

        Ok(author_list_path().to_string())
    }
}
