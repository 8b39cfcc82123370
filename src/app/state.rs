// ==========================================
// 云安全基线管理系统 - 应用状态
// ==========================================
// 职责: 进程启动时一次性装配仓储、引擎与 API
// 约束: 配置显式传入，不经全局访问器查找
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::{ConfigItemApi, ProductApi, ProviderApi};
use crate::config::AppConfig;
use crate::db::{init_schema, open_sqlite_connection_with_timeout};
use crate::engine::ReferenceValidator;
use crate::exporter::ConfigItemExporter;
use crate::importer::{ConfigItemImporterImpl, UniversalFileParser};
use crate::repository::{
    ConfigItemRepository, ConfigItemRepositoryImpl, ProductRepository, ProductRepositoryImpl,
    ProviderRepository, ProviderRepositoryImpl,
};

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    pub config: AppConfig,

    /// 云服务商API
    pub provider_api: Arc<ProviderApi>,

    /// 云产品API
    pub product_api: Arc<ProductApi>,

    /// 安全配置项API
    pub config_item_api: Arc<ConfigItemApi>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库并建表（幂等）
    /// 2. 初始化所有Repository（共享同一连接）
    /// 3. 创建所有API实例
    pub fn new(config: AppConfig) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", config.database.path);

        if let Some(parent) = std::path::Path::new(&config.database.path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| format!("无法创建数据库目录: {}", e))?;
            }
        }

        let conn = open_sqlite_connection_with_timeout(
            &config.database.path,
            config.database.busy_timeout_ms,
        )
        .map_err(|e| format!("无法打开数据库: {}", e))?;

        Self::with_connection(conn, config)
    }

    /// 基于已打开的连接装配（测试可传入内存库）
    pub fn with_connection(conn: Connection, config: AppConfig) -> Result<Self, String> {
        init_schema(&conn).map_err(|e| format!("数据库初始化失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let provider_repo: Arc<dyn ProviderRepository> =
            Arc::new(ProviderRepositoryImpl::from_connection(conn.clone()));
        let product_repo: Arc<dyn ProductRepository> =
            Arc::new(ProductRepositoryImpl::from_connection(conn.clone()));
        let item_repo: Arc<dyn ConfigItemRepository> =
            Arc::new(ConfigItemRepositoryImpl::from_connection(conn));

        // ==========================================
        // 初始化Engine层
        // ==========================================
        let validator = Arc::new(ReferenceValidator::new(
            provider_repo.clone(),
            product_repo.clone(),
        ));

        let importer = Arc::new(ConfigItemImporterImpl::new(
            item_repo.clone(),
            validator.clone(),
            Box::new(UniversalFileParser),
            config.tabular.import_path.clone(),
        ));
        let exporter = ConfigItemExporter::new(config.tabular.export_path.clone());

        // ==========================================
        // 初始化API层
        // ==========================================
        let provider_api = Arc::new(ProviderApi::new(provider_repo.clone()));
        let product_api = Arc::new(ProductApi::new(product_repo, provider_repo));
        let config_item_api = Arc::new(ConfigItemApi::new(item_repo, validator, importer, exporter));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            config,
            provider_api,
            product_api,
            config_item_api,
        })
    }

    pub fn db_path(&self) -> &str {
        &self.config.database.path
    }
}
