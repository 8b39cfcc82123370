// ==========================================
// 云安全基线管理系统 - 配置项导出器
// ==========================================
// 输出: CSV（UTF-8 BOM，Excel 可直接打开）
// 列布局与导入一致，共 11 列；2、3 列输出服务商/产品名称而非 ID
// 文件名: config_items_{时间戳}_{随机后缀}.csv，并发导出互不覆盖
// ==========================================

use crate::domain::ConfigItemDetail;
use crate::exporter::error::{ExportError, ExportResult};
use chrono::{DateTime, Utc};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::{self, File};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;
use uuid::Uuid;

/// 导出表头（固定顺序）
pub const EXPORT_HEADERS: [&str; 11] = [
    "ID",
    "云服务商",
    "云产品",
    "配置项名称",
    "推荐配置值",
    "风险说明",
    "检查方法",
    "配置方式",
    "参考资料",
    "创建时间",
    "更新时间",
];

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// 导出结果
#[derive(Debug, Clone, Serialize)]
pub struct ExportSummary {
    pub file_path: PathBuf,
    pub file_name: String,
    pub rows: usize,
}

pub struct ConfigItemExporter {
    export_dir: PathBuf,
}

impl ConfigItemExporter {
    pub fn new(export_dir: impl Into<PathBuf>) -> Self {
        Self {
            export_dir: export_dir.into(),
        }
    }

    fn format_time(ts: &DateTime<Utc>) -> String {
        ts.format(TIMESTAMP_FORMAT).to_string()
    }

    /// 单行记录（名称缺失时回退为 ID）
    fn to_record(detail: &ConfigItemDetail) -> [String; 11] {
        let item = &detail.item;
        [
            item.id.to_string(),
            detail
                .provider_name
                .clone()
                .unwrap_or_else(|| item.cloud_provider_id.to_string()),
            detail
                .product_name
                .clone()
                .unwrap_or_else(|| item.product_id.to_string()),
            item.name.clone(),
            item.recommended_value.clone(),
            item.risk_description.clone(),
            item.check_method.clone(),
            item.configuration_method.clone(),
            item.reference.clone(),
            Self::format_time(&item.created_at),
            Self::format_time(&item.updated_at),
        ]
    }

    fn unique_file_name() -> String {
        format!(
            "config_items_{}_{}.csv",
            Utc::now().format("%Y%m%d%H%M%S"),
            &Uuid::new_v4().simple().to_string()[..8]
        )
    }

    /// 写出导出文件
    ///
    /// # 返回
    /// - Err(NoData): 结果集为空，不生成文件
    pub fn export(&self, items: &[ConfigItemDetail]) -> ExportResult<ExportSummary> {
        if items.is_empty() {
            return Err(ExportError::NoData);
        }

        fs::create_dir_all(&self.export_dir)?;

        let file_name = Self::unique_file_name();
        let file_path = self.export_dir.join(&file_name);

        let mut file = File::create(&file_path)?;
        file.write_all(UTF8_BOM)?;

        let mut writer = WriterBuilder::new().from_writer(file);
        writer.write_record(EXPORT_HEADERS)?;
        for detail in items {
            writer.write_record(Self::to_record(detail))?;
        }
        writer.flush()?;

        info!(path = %file_path.display(), rows = items.len(), "配置项导出完成");

        Ok(ExportSummary {
            file_path,
            file_name,
            rows: items.len(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ConfigItem;
    use chrono::TimeZone;
    use tempfile::TempDir;

    fn detail(id: i64, provider_name: Option<&str>) -> ConfigItemDetail {
        let ts = Utc.with_ymd_and_hms(2024, 3, 5, 8, 9, 10).unwrap();
        ConfigItemDetail {
            item: ConfigItem {
                id,
                cloud_provider_id: 1,
                product_id: 10,
                name: format!("item-{}", id),
                recommended_value: "开启".into(),
                risk_description: "含,逗号".into(),
                check_method: String::new(),
                configuration_method: String::new(),
                reference: String::new(),
                created_at: ts,
                updated_at: ts,
            },
            provider_name: provider_name.map(str::to_string),
            product_name: Some("EC2".into()),
        }
    }

    #[test]
    fn test_empty_export_rejected() {
        let dir = TempDir::new().unwrap();
        let exporter = ConfigItemExporter::new(dir.path().join("out"));

        assert!(matches!(exporter.export(&[]), Err(ExportError::NoData)));
        assert!(!dir.path().join("out").exists());
    }

    #[test]
    fn test_export_layout() {
        let dir = TempDir::new().unwrap();
        let exporter = ConfigItemExporter::new(dir.path());

        let summary = exporter
            .export(&[detail(1, Some("AWS")), detail(2, None)])
            .unwrap();
        assert_eq!(summary.rows, 2);
        assert!(summary.file_name.starts_with("config_items_"));

        let bytes = fs::read(&summary.file_path).unwrap();
        assert!(bytes.starts_with(UTF8_BOM));

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .from_reader(&bytes[UTF8_BOM.len()..]);
        let headers: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(headers, EXPORT_HEADERS);

        let records: Vec<csv::StringRecord> = reader.records().map(|r| r.unwrap()).collect();
        assert_eq!(&records[0][1], "AWS");
        assert_eq!(&records[0][2], "EC2");
        assert_eq!(&records[0][5], "含,逗号");
        assert_eq!(&records[0][9], "2024-03-05 08:09:10");
        // 服务商已删除时回退为 ID
        assert_eq!(&records[1][1], "1");
    }

    #[test]
    fn test_file_names_unique() {
        let dir = TempDir::new().unwrap();
        let exporter = ConfigItemExporter::new(dir.path());

        let a = exporter.export(&[detail(1, Some("AWS"))]).unwrap();
        let b = exporter.export(&[detail(1, Some("AWS"))]).unwrap();
        assert_ne!(a.file_name, b.file_name);
    }
}
