// ==========================================
// 云安全基线管理系统 - 云产品 API
// ==========================================
// 职责: 云产品 CRUD
// 约束: (cloud_provider_id, code) 复合唯一；删除不级联
// ==========================================

use std::sync::Arc;
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{Product, ProductInput};
use crate::repository::{ProductRepository, ProviderRepository};

/// 云产品管理API
pub struct ProductApi {
    product_repo: Arc<dyn ProductRepository>,
    provider_repo: Arc<dyn ProviderRepository>,
}

impl ProductApi {
    pub fn new(
        product_repo: Arc<dyn ProductRepository>,
        provider_repo: Arc<dyn ProviderRepository>,
    ) -> Self {
        Self {
            product_repo,
            provider_repo,
        }
    }

    fn validate_input(input: &ProductInput) -> ApiResult<()> {
        if input.name.is_empty() {
            return Err(ApiError::InvalidData("云产品名称不能为空".to_string()));
        }
        if input.code.is_empty() {
            return Err(ApiError::InvalidData("云产品代码不能为空".to_string()));
        }
        Ok(())
    }

    fn require_provider(&self, provider_id: i64, operation: &str) -> ApiResult<()> {
        self.provider_repo
            .find_by_id(provider_id)
            .map_err(|e| ApiError::store(operation, e))?
            .map(|_| ())
            .ok_or_else(|| ApiError::NotFound("云服务商不存在".to_string()))
    }

    fn require(&self, id: i64, operation: &str) -> ApiResult<Product> {
        self.product_repo
            .find_by_id(id)
            .map_err(|e| ApiError::store(operation, e))?
            .ok_or_else(|| ApiError::NotFound("云产品不存在".to_string()))
    }

    /// (provider, code) 不得被其他产品占用
    fn ensure_code_free(
        &self,
        provider_id: i64,
        code: &str,
        self_id: Option<i64>,
        operation: &str,
    ) -> ApiResult<()> {
        let owner = self
            .product_repo
            .find_by_code(provider_id, code)
            .map_err(|e| ApiError::store(operation, e))?;

        match owner {
            Some(p) if Some(p.id) != self_id => {
                Err(ApiError::Duplicate("该服务商下云产品代码已存在".to_string()))
            }
            _ => Ok(()),
        }
    }

    pub fn list_products(&self) -> ApiResult<Vec<Product>> {
        self.product_repo
            .find_all()
            .map_err(|e| ApiError::store("获取云产品列表失败", e))
    }

    pub fn get_product(&self, id: i64) -> ApiResult<Product> {
        self.require(id, "获取云产品详情失败")
    }

    /// 查询某服务商的产品（服务商必须存在）
    pub fn list_products_by_provider(&self, provider_id: i64) -> ApiResult<Vec<Product>> {
        self.require_provider(provider_id, "获取云产品列表失败")?;

        self.product_repo
            .find_by_provider_id(provider_id)
            .map_err(|e| ApiError::store("获取云产品列表失败", e))
    }

    /// 按服务商代码查询产品（服务商必须存在）
    pub fn list_products_by_provider_code(&self, provider_code: &str) -> ApiResult<Vec<Product>> {
        let provider_code = provider_code.trim();
        let provider = self
            .provider_repo
            .find_by_code(provider_code)
            .map_err(|e| ApiError::store("获取云产品列表失败", e))?;
        if provider.is_none() {
            return Err(ApiError::NotFound("云服务商不存在".to_string()));
        }

        self.product_repo
            .find_by_provider_code(provider_code)
            .map_err(|e| ApiError::store("获取云产品列表失败", e))
    }

    /// 创建云产品
    ///
    /// # 返回
    /// - Err(NotFound): 服务商不存在
    /// - Err(Duplicate): 该服务商下 code 已存在
    #[instrument(skip(self, input), fields(provider_id = input.cloud_provider_id, code = %input.code))]
    pub fn create_product(&self, input: ProductInput) -> ApiResult<Product> {
        let input = input.trimmed();
        Self::validate_input(&input)?;

        self.require_provider(input.cloud_provider_id, "创建云产品失败")?;
        self.ensure_code_free(input.cloud_provider_id, &input.code, None, "创建云产品失败")?;

        let product = self
            .product_repo
            .insert(&input)
            .map_err(|e| ApiError::store("创建云产品失败", e))?;

        info!(id = product.id, "云产品已创建");
        Ok(product)
    }

    /// 整体更新云产品
    #[instrument(skip(self, input))]
    pub fn update_product(&self, id: i64, input: ProductInput) -> ApiResult<Product> {
        let input = input.trimmed();
        Self::validate_input(&input)?;

        let existing = self.require(id, "更新云产品失败")?;

        let provider_changed = input.cloud_provider_id != existing.cloud_provider_id;
        if provider_changed {
            self.require_provider(input.cloud_provider_id, "更新云产品失败")?;
        }
        if provider_changed || input.code != existing.code {
            self.ensure_code_free(input.cloud_provider_id, &input.code, Some(id), "更新云产品失败")?;
        }

        let product = self
            .product_repo
            .update(id, &input)
            .map_err(|e| ApiError::store("更新云产品失败", e))?;

        info!("云产品已更新");
        Ok(product)
    }

    /// 删除云产品（不级联删除配置项）
    #[instrument(skip(self))]
    pub fn delete_product(&self, id: i64) -> ApiResult<()> {
        self.require(id, "删除云产品失败")?;

        self.product_repo
            .delete(id)
            .map_err(|e| ApiError::store("删除云产品失败", e))?;

        info!("云产品已删除");
        Ok(())
    }
}
