// ==========================================
// 云安全基线管理系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、输入结构、查询类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod config_item;
pub mod product;
pub mod provider;
pub mod query;

// 重导出核心类型
pub use config_item::{ConfigItem, ConfigItemDetail, ConfigItemInput};
pub use product::{Product, ProductInput};
pub use provider::{Provider, ProviderInput};
pub use query::{ConfigItemFilter, ConfigItemQuery, PageResult};
