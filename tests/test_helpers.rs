// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库、应用状态装配、基础数据与表格文件生成
// ==========================================

#![allow(dead_code)]

use cloud_baseline::config::AppConfig;
use cloud_baseline::domain::{ConfigItemInput, Product, ProductInput, Provider, ProviderInput};
use cloud_baseline::AppState;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// 创建基于临时目录的 AppState
///
/// # 返回
/// - TempDir: 临时目录（需要保持存活）
/// - AppState: 数据库、导入、导出目录均位于临时目录内
pub fn create_test_state() -> (TempDir, AppState) {
    let dir = TempDir::new().unwrap();

    let mut config = AppConfig::default();
    config.database.path = dir.path().join("test.db").display().to_string();
    config.tabular.import_path = dir.path().join("import");
    config.tabular.export_path = dir.path().join("export");

    let state = AppState::new(config).unwrap();
    (dir, state)
}

/// 基础数据
///
/// - aws: ec2, s3
/// - azure: vm
pub struct Catalog {
    pub aws: Provider,
    pub azure: Provider,
    pub ec2: Product,
    pub s3: Product,
    pub vm: Product,
}

pub fn seed_catalog(state: &AppState) -> Catalog {
    let aws = state
        .provider_api
        .create_provider(ProviderInput::new("AWS", "aws"))
        .unwrap();
    let azure = state
        .provider_api
        .create_provider(ProviderInput::new("Azure", "azure"))
        .unwrap();

    let ec2 = state
        .product_api
        .create_product(ProductInput::new(aws.id, "EC2", "ec2"))
        .unwrap();
    let s3 = state
        .product_api
        .create_product(ProductInput::new(aws.id, "S3", "s3"))
        .unwrap();
    let vm = state
        .product_api
        .create_product(ProductInput::new(azure.id, "Virtual Machines", "vm"))
        .unwrap();

    Catalog {
        aws,
        azure,
        ec2,
        s3,
        vm,
    }
}

/// 构造完整的配置项输入
pub fn item_input(provider_id: i64, product_id: i64, name: &str) -> ConfigItemInput {
    ConfigItemInput {
        cloud_provider_id: provider_id,
        product_id,
        name: name.to_string(),
        recommended_value: format!("{} 推荐值", name),
        risk_description: format!("{} 风险", name),
        check_method: "控制台检查".to_string(),
        configuration_method: "CLI 配置".to_string(),
        reference: "https://docs.example.com".to_string(),
    }
}

/// 导入表头
pub const IMPORT_HEADER: &str =
    "ID,云服务商,云产品,配置项名称,推荐配置值,风险说明,检查方法,配置方式,参考资料";

/// 一行完整的导入数据
pub fn import_line(provider_id: i64, product_id: i64, name: &str) -> String {
    format!(
        ",{},{},{},on,{} 风险,check,configure,ref",
        provider_id, product_id, name, name
    )
}

/// 在目录下写出 CSV 文件
pub fn write_csv(dir: &Path, file_name: &str, lines: &[String]) -> PathBuf {
    let path = dir.join(file_name);
    std::fs::write(&path, lines.join("\n")).unwrap();
    path
}
