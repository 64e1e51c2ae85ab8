//! 应用层错误定义
//!
//! 工作流的统一错误类型。校验失败不在此列——它由各工作流
//! 就地处理为表单回显，不会作为硬错误向外传播。

use thiserror::Error;
use uuid::Uuid;

use crate::application::ports::RepositoryError;

/// 工作流错误
#[derive(Debug, Error)]
pub enum WorkflowError {
    /// 按 ID 取记录未命中（GET 类操作的 404 结局）
    #[error("{resource_type} not found: {id}")]
    NotFound {
        resource_type: &'static str,
        id: Uuid,
    },

    /// 引用字段指向的记录已不存在（population 失败，同样是 404 结局）
    #[error("{resource_type} reference is dangling: {id}")]
    DanglingReference {
        resource_type: &'static str,
        id: Uuid,
    },

    /// 底层存储不可用（5xx 结局，向上传播，不重试）
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),
}

impl WorkflowError {
    /// 创建 NotFound 错误
    pub fn not_found(resource_type: &'static str, id: Uuid) -> Self {
        Self::NotFound { resource_type, id }
    }

    /// 创建 DanglingReference 错误
    pub fn dangling(resource_type: &'static str, id: Uuid) -> Self {
        Self::DanglingReference { resource_type, id }
    }

    /// 把针对某条记录的 Repository 错误映射为工作流错误，
    /// 保留 NotFound 的 404 语义
    pub fn from_repo(resource_type: &'static str, id: Uuid, err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound => Self::NotFound { resource_type, id },
            other => Self::StoreUnavailable(other.to_string()),
        }
    }
}

impl From<RepositoryError> for WorkflowError {
    /// 集合类读写不携带具体记录标识，NotFound 在这些路径上
    /// 不会出现；任何错误都按存储失败处理
    fn from(err: RepositoryError) -> Self {
        Self::StoreUnavailable(err.to_string())
    }
}
