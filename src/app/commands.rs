// ==========================================
// 云安全基线管理系统 - 命令层
// ==========================================
// 职责: 原始参数 → API 调用 → 统一响应信封
// 约束: 不含业务逻辑，只做参数解析与错误映射
// ==========================================

use std::collections::HashMap;
use std::path::Path;

use crate::api::{ApiError, ApiResponse};
use crate::app::AppState;
use crate::domain::{
    ConfigItem, ConfigItemDetail, ConfigItemFilter, ConfigItemInput, PageResult, Product,
    ProductInput, Provider, ProviderInput,
};
use crate::exporter::ExportSummary;
use crate::importer::ImportSummary;

/// 解析 ID 参数（非负 32 位整数）
pub fn parse_id(raw: &str) -> Result<i64, ApiError> {
    raw.trim()
        .parse::<u32>()
        .map(i64::from)
        .map_err(|_| ApiError::InvalidData("无效的ID参数".to_string()))
}

fn with_id<T>(raw: &str, f: impl FnOnce(i64) -> Result<T, ApiError>) -> ApiResponse<T> {
    parse_id(raw).and_then(f).into()
}

// ==========================================
// 云服务商
// ==========================================

pub fn list_providers(state: &AppState) -> ApiResponse<Vec<Provider>> {
    state.provider_api.list_providers().into()
}

pub fn get_provider(state: &AppState, id: &str) -> ApiResponse<Provider> {
    with_id(id, |id| state.provider_api.get_provider(id))
}

pub fn create_provider(state: &AppState, input: ProviderInput) -> ApiResponse<Provider> {
    state.provider_api.create_provider(input).into()
}

pub fn update_provider(state: &AppState, id: &str, input: ProviderInput) -> ApiResponse<Provider> {
    with_id(id, |id| state.provider_api.update_provider(id, input))
}

pub fn delete_provider(state: &AppState, id: &str) -> ApiResponse<()> {
    with_id(id, |id| state.provider_api.delete_provider(id))
}

// ==========================================
// 云产品
// ==========================================

/// 按服务商 ID 或代码筛选；均未提供时返回全部
pub fn list_products(
    state: &AppState,
    provider_id: Option<&str>,
    provider_code: Option<&str>,
) -> ApiResponse<Vec<Product>> {
    match (provider_id, provider_code) {
        (Some(id), _) => with_id(id, |id| state.product_api.list_products_by_provider(id)),
        (None, Some(code)) => state.product_api.list_products_by_provider_code(code).into(),
        (None, None) => state.product_api.list_products().into(),
    }
}

pub fn create_product(state: &AppState, input: ProductInput) -> ApiResponse<Product> {
    state.product_api.create_product(input).into()
}

pub fn delete_product(state: &AppState, id: &str) -> ApiResponse<()> {
    with_id(id, |id| state.product_api.delete_product(id))
}

// ==========================================
// 安全配置项
// ==========================================

/// 按 URL 风格查询参数过滤分页
pub fn query_config_items(
    state: &AppState,
    params: &HashMap<String, String>,
) -> ApiResponse<PageResult<ConfigItemDetail>> {
    let filter = ConfigItemFilter::from_query(params);
    state.config_item_api.query_config_items(&filter).into()
}

pub fn get_config_item(state: &AppState, id: &str) -> ApiResponse<ConfigItem> {
    with_id(id, |id| state.config_item_api.get_config_item(id))
}

pub fn create_config_item(state: &AppState, input: ConfigItemInput) -> ApiResponse<ConfigItem> {
    state.config_item_api.create_config_item(input).into()
}

pub fn delete_config_item(state: &AppState, id: &str) -> ApiResponse<()> {
    with_id(id, |id| state.config_item_api.delete_config_item(id))
}

pub async fn import_config_items(state: &AppState, file_path: &Path) -> ApiResponse<ImportSummary> {
    state.config_item_api.import_config_items(file_path).await.into()
}

pub fn export_config_items(
    state: &AppState,
    params: &HashMap<String, String>,
) -> ApiResponse<ExportSummary> {
    let filter = ConfigItemFilter::from_query(params);
    state.config_item_api.export_config_items(&filter).into()
}
