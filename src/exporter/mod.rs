// ==========================================
// 云安全基线管理系统 - 导出层
// ==========================================
// 职责: 过滤结果 → 表格文件
// ==========================================

pub mod config_item_exporter;
pub mod error;

pub use config_item_exporter::{ConfigItemExporter, ExportSummary, EXPORT_HEADERS, TIMESTAMP_FORMAT};
pub use error::{ExportError, ExportResult};
