// ==========================================
// 云安全基线管理系统 - 云服务商 API
// ==========================================
// 职责: 云服务商 CRUD
// 约束: code 全局唯一；删除不级联
// ==========================================

use std::sync::Arc;
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{Provider, ProviderInput};
use crate::repository::ProviderRepository;

/// 云服务商管理API
pub struct ProviderApi {
    provider_repo: Arc<dyn ProviderRepository>,
}

impl ProviderApi {
    pub fn new(provider_repo: Arc<dyn ProviderRepository>) -> Self {
        Self { provider_repo }
    }

    fn validate_input(input: &ProviderInput) -> ApiResult<()> {
        if input.name.is_empty() {
            return Err(ApiError::InvalidData("云服务商名称不能为空".to_string()));
        }
        if input.code.is_empty() {
            return Err(ApiError::InvalidData("云服务商代码不能为空".to_string()));
        }
        Ok(())
    }

    fn require(&self, id: i64, operation: &str) -> ApiResult<Provider> {
        self.provider_repo
            .find_by_id(id)
            .map_err(|e| ApiError::store(operation, e))?
            .ok_or_else(|| ApiError::NotFound("云服务商不存在".to_string()))
    }

    /// 查询全部云服务商
    pub fn list_providers(&self) -> ApiResult<Vec<Provider>> {
        self.provider_repo
            .find_all()
            .map_err(|e| ApiError::store("获取云服务商列表失败", e))
    }

    pub fn get_provider(&self, id: i64) -> ApiResult<Provider> {
        self.require(id, "获取云服务商详情失败")
    }

    pub fn get_provider_by_code(&self, code: &str) -> ApiResult<Provider> {
        self.provider_repo
            .find_by_code(code.trim())
            .map_err(|e| ApiError::store("获取云服务商详情失败", e))?
            .ok_or_else(|| ApiError::NotFound("云服务商不存在".to_string()))
    }

    /// 创建云服务商
    ///
    /// # 返回
    /// - Err(Duplicate): code 已存在
    /// - Err(InvalidData): 名称或代码为空
    #[instrument(skip(self, input), fields(code = %input.code))]
    pub fn create_provider(&self, input: ProviderInput) -> ApiResult<Provider> {
        let input = input.trimmed();
        Self::validate_input(&input)?;

        let existing = self
            .provider_repo
            .find_by_code(&input.code)
            .map_err(|e| ApiError::store("创建云服务商失败", e))?;
        if existing.is_some() {
            return Err(ApiError::Duplicate("云服务商代码已存在".to_string()));
        }

        let provider = self
            .provider_repo
            .insert(&input)
            .map_err(|e| ApiError::store("创建云服务商失败", e))?;

        info!(id = provider.id, "云服务商已创建");
        Ok(provider)
    }

    /// 整体更新云服务商
    #[instrument(skip(self, input))]
    pub fn update_provider(&self, id: i64, input: ProviderInput) -> ApiResult<Provider> {
        let input = input.trimmed();
        Self::validate_input(&input)?;

        let existing = self.require(id, "更新云服务商失败")?;

        if input.code != existing.code {
            let owner = self
                .provider_repo
                .find_by_code(&input.code)
                .map_err(|e| ApiError::store("更新云服务商失败", e))?;
            if owner.is_some_and(|p| p.id != id) {
                return Err(ApiError::Duplicate("云服务商代码已存在".to_string()));
            }
        }

        let provider = self
            .provider_repo
            .update(id, &input)
            .map_err(|e| ApiError::store("更新云服务商失败", e))?;

        info!("云服务商已更新");
        Ok(provider)
    }

    /// 删除云服务商（不级联删除产品与配置项）
    #[instrument(skip(self))]
    pub fn delete_provider(&self, id: i64) -> ApiResult<()> {
        self.require(id, "删除云服务商失败")?;

        self.provider_repo
            .delete(id)
            .map_err(|e| ApiError::store("删除云服务商失败", e))?;

        info!("云服务商已删除");
        Ok(())
    }
}
