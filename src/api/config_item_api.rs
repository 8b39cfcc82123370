// ==========================================
// 云安全基线管理系统 - 安全配置项 API
// ==========================================
// 职责: 配置项 CRUD、过滤分页、批量导入导出
// 红线:
// - 任何写入前先做引用完整性校验
// - 导入全有或全无
// - 导出受分页上限约束（单次最多 100 条）
// ==========================================

use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{ConfigItem, ConfigItemDetail, ConfigItemFilter, ConfigItemInput, PageResult};
use crate::engine::{ConfigItemQueryEngine, ReferenceValidator, EXPORT_PAGE_SIZE};
use crate::exporter::{ConfigItemExporter, ExportSummary};
use crate::importer::{ConfigItemImporter, ImportSummary};
use crate::repository::ConfigItemRepository;

/// 安全配置项API
pub struct ConfigItemApi {
    item_repo: Arc<dyn ConfigItemRepository>,
    validator: Arc<ReferenceValidator>,
    query_engine: ConfigItemQueryEngine,
    importer: Arc<dyn ConfigItemImporter>,
    exporter: ConfigItemExporter,
}

impl ConfigItemApi {
    pub fn new(
        item_repo: Arc<dyn ConfigItemRepository>,
        validator: Arc<ReferenceValidator>,
        importer: Arc<dyn ConfigItemImporter>,
        exporter: ConfigItemExporter,
    ) -> Self {
        let query_engine = ConfigItemQueryEngine::new(item_repo.clone(), validator.clone());
        Self {
            item_repo,
            validator,
            query_engine,
            importer,
            exporter,
        }
    }

    fn validate_input(input: &ConfigItemInput) -> ApiResult<()> {
        if input.name.trim().is_empty() {
            return Err(ApiError::InvalidData("配置项名称不能为空".to_string()));
        }
        Ok(())
    }

    fn require(&self, id: i64, operation: &str) -> ApiResult<ConfigItem> {
        self.item_repo
            .find_by_id(id)
            .map_err(|e| ApiError::store(operation, e))?
            .ok_or_else(|| ApiError::NotFound("配置项不存在".to_string()))
    }

    // ==========================================
    // 查询
    // ==========================================

    pub fn get_config_item(&self, id: i64) -> ApiResult<ConfigItem> {
        self.require(id, "获取配置项详情失败")
    }

    /// 过滤分页查询
    ///
    /// # 返回
    /// - Err(NotFound): 过滤引用的服务商/产品不存在
    pub fn query_config_items(
        &self,
        filter: &ConfigItemFilter,
    ) -> ApiResult<PageResult<ConfigItemDetail>> {
        Ok(self.query_engine.query(filter)?)
    }

    /// 查询 (服务商, 产品) 下的全部配置项（不分页）
    pub fn list_by_provider_and_product(
        &self,
        provider_id: i64,
        product_id: i64,
    ) -> ApiResult<Vec<ConfigItem>> {
        self.validator.ensure_provider(provider_id)?;
        self.validator.ensure_product(product_id)?;

        self.item_repo
            .find_by_provider_and_product(provider_id, product_id)
            .map_err(|e| ApiError::store("获取配置项列表失败", e))
    }

    // ==========================================
    // 写入
    // ==========================================

    #[instrument(skip(self, input), fields(
        provider_id = input.cloud_provider_id,
        product_id = input.product_id
    ))]
    pub fn create_config_item(&self, input: ConfigItemInput) -> ApiResult<ConfigItem> {
        Self::validate_input(&input)?;
        self.validator.validate_input(&input)?;

        let item = self
            .item_repo
            .insert(&input)
            .map_err(|e| ApiError::store("创建配置项失败", e))?;

        info!(id = item.id, "配置项已创建");
        Ok(item)
    }

    /// 整体更新配置项；关联变化时重新校验
    #[instrument(skip(self, input))]
    pub fn update_config_item(&self, id: i64, input: ConfigItemInput) -> ApiResult<ConfigItem> {
        Self::validate_input(&input)?;

        let existing = self.require(id, "更新配置项失败")?;
        self.validator.validate_update(&existing, &input)?;

        let item = self
            .item_repo
            .update(id, &input)
            .map_err(|e| ApiError::store("更新配置项失败", e))?;

        info!("配置项已更新");
        Ok(item)
    }

    #[instrument(skip(self))]
    pub fn delete_config_item(&self, id: i64) -> ApiResult<()> {
        self.require(id, "删除配置项失败")?;

        self.item_repo
            .delete(id)
            .map_err(|e| ApiError::store("删除配置项失败", e))?;

        info!("配置项已删除");
        Ok(())
    }

    // ==========================================
    // 导入导出
    // ==========================================

    /// 从本地文件导入
    pub async fn import_config_items(&self, file_path: &Path) -> ApiResult<ImportSummary> {
        Ok(self.importer.import_from_file(file_path).await?)
    }

    /// 暂存上传内容后导入
    pub async fn import_upload(&self, bytes: &[u8], file_name: &str) -> ApiResult<ImportSummary> {
        let staged = self.importer.stage_upload(bytes, file_name).await?;
        self.import_config_items(&staged).await
    }

    /// 按过滤条件导出（分页参数被忽略，取第 1 页，上限 100 条）
    #[instrument(skip(self))]
    pub fn export_config_items(&self, filter: &ConfigItemFilter) -> ApiResult<ExportSummary> {
        let export_filter = ConfigItemFilter {
            page: 1,
            page_size: EXPORT_PAGE_SIZE,
            ..filter.clone()
        };

        let page = self.query_engine.query(&export_filter)?;
        if (page.data.len() as i64) < page.total {
            info!(
                total = page.total,
                exported = page.data.len(),
                "导出结果受分页上限截断"
            );
        }

        Ok(self.exporter.export(&page.data)?)
    }
}
