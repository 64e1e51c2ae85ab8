//! Libris - 图书馆目录管理系统
//!
//! 架构设计: DDD + CQRS + Hexagonal Architecture
//!
//! 领域层 (domain/):
//! - Catalog Context: 目录记录（Author / Genre / Book / BookInstance）与派生字段
//!
//! 应用层 (application/):
//! - Ports: Entity Store 端口定义
//! - Validation: 输入清洗与字段校验
//! - Resolver: 引用展开（population）
//! - Commands: CQRS 命令处理器（创建 / 整体替换 / 删除）
//! - Queries: CQRS 查询处理器（列表 / 详情 / 表单 / 删除确认）
//!
//! 基础设施层 (infrastructure/):
//! - Persistence: SQLite 存储
//! - Memory: 内存存储（测试与演示）

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;

pub use config::{load_config, AppConfig};
