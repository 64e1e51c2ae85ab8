//! BookInstance Queries

use crate::domain::catalog::BookInstanceId;

/// 列出所有副本（book 引用已展开）
#[derive(Debug, Clone)]
pub struct ListBookInstances;

/// 获取副本详情
#[derive(Debug, Clone)]
pub struct GetBookInstance {
    pub instance_id: BookInstanceId,
}

/// 获取副本创建表单（空草稿 + 图书辅助列表）
#[derive(Debug, Clone)]
pub struct GetBookInstanceCreateForm;

/// 获取副本编辑表单（目标记录与辅助列表并发获取）
#[derive(Debug, Clone)]
pub struct GetBookInstanceUpdateForm {
    pub instance_id: BookInstanceId,
}

/// 获取副本删除确认页
#[derive(Debug, Clone)]
pub struct GetBookInstanceDeleteConfirm {
    pub instance_id: BookInstanceId,
}
