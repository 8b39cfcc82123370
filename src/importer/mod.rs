// ==========================================
// 云安全基线管理系统 - 导入层
// ==========================================
// 职责: 表格文件 → 配置项批量写入
// 支持: Excel (.xlsx/.xls), CSV
// ==========================================

// 模块声明
pub mod config_item_importer_impl;
pub mod config_item_importer_trait;
pub mod error;
pub mod file_parser;
pub mod row_mapper;

// 重导出核心类型
pub use config_item_importer_impl::ConfigItemImporterImpl;
pub use config_item_importer_trait::{ConfigItemImporter, ImportSummary};
pub use error::{ImportError, ImportResult};
pub use file_parser::{CsvParser, ExcelParser, FileParser, RawRow, UniversalFileParser};
pub use row_mapper::{map_rows, CandidateRow, MappedRows, SkippedRow, MIN_POPULATED_COLUMNS};
