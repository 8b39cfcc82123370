// ==========================================
// 云安全基线管理系统 - 引擎层
// ==========================================
// 职责: 引用完整性校验、过滤分页
// 红线: Engine 不拼 SQL，只经由 Repository 访问数据
// ==========================================

pub mod error;
pub mod integrity;
pub mod pagination;
pub mod query;

// 重导出核心引擎
pub use error::{IntegrityError, IntegrityResult};
pub use integrity::ReferenceValidator;
pub use pagination::{Pagination, DEFAULT_PAGE, DEFAULT_PAGE_SIZE, EXPORT_PAGE_SIZE, MAX_PAGE_SIZE};
pub use query::ConfigItemQueryEngine;
