// ==========================================
// 云安全基线管理系统 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod config_item_repo;
pub mod config_item_repo_impl;
pub mod error;
pub mod product_repo;
pub mod product_repo_impl;
pub mod provider_repo;
pub mod provider_repo_impl;
pub mod sql_builder;

// 重导出核心仓储
pub use config_item_repo::ConfigItemRepository;
pub use config_item_repo_impl::ConfigItemRepositoryImpl;
pub use error::{RepositoryError, RepositoryResult};
pub use product_repo::ProductRepository;
pub use product_repo_impl::ProductRepositoryImpl;
pub use provider_repo::ProviderRepository;
pub use provider_repo_impl::ProviderRepositoryImpl;
