// ==========================================
// 云安全基线管理系统 - API 层
// ==========================================
// 职责: 业务接口，组合引擎与仓储，统一错误语义
// ==========================================

pub mod config_item_api;
pub mod error;
pub mod product_api;
pub mod provider_api;
pub mod response;

pub use config_item_api::ConfigItemApi;
pub use error::{ApiError, ApiResult};
pub use product_api::ProductApi;
pub use provider_api::ProviderApi;
pub use response::ApiResponse;
