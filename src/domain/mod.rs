//! Domain Layer - 领域层
//!
//! 包含一个限界上下文:
//! - Catalog Context: 馆藏目录管理（作者、图书、类目、副本）

pub mod catalog;
