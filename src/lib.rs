// ==========================================
// 云安全基线管理系统 - 核心库
// ==========================================
// 实体: 云服务商 / 云产品 / 安全配置项
// 技术栈: Rust + SQLite
// 核心: 引用完整性校验、过滤分页查询、批量导入导出
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与查询类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则（引用完整性 / 分页查询）
pub mod engine;

// 导入层 - 表格文件导入
pub mod importer;

// 导出层 - 表格文件导出
pub mod exporter;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/建表）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 依赖装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域实体
pub use domain::{
    ConfigItem, ConfigItemDetail, ConfigItemFilter, ConfigItemInput, PageResult, Product,
    ProductInput, Provider, ProviderInput,
};

// 引擎
pub use engine::{ConfigItemQueryEngine, IntegrityError, Pagination, ReferenceValidator};

// API
pub use api::{ApiError, ApiResponse, ConfigItemApi, ProductApi, ProviderApi};

// 应用
pub use app::AppState;
pub use config::AppConfig;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "云安全基线管理系统";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}
