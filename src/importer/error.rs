// ==========================================
// 云安全基线管理系统 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::engine::IntegrityError;
use crate::repository::RepositoryError;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xls/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    // ===== 数据错误 =====
    #[error("导入数据无效: {0}")]
    InvalidData(String),

    /// 第一个引用校验失败的行，整批放弃
    ///
    /// - position: 有效候选行中的序号（从 1 开始）
    /// - line: 文档中的行号（表头为第 1 行）
    #[error("第 {position} 条数据（文件第 {line} 行）校验失败: {source}")]
    RowRejected {
        position: usize,
        line: usize,
        #[source]
        source: IntegrityError,
    },

    // ===== 服务端错误 =====
    /// 上传文件写入导入目录失败
    #[error("上传文件暂存失败: {0}")]
    Staging(#[source] std::io::Error),

    // ===== 数据库错误 =====
    #[error("批量写入失败: {0}")]
    Persist(#[from] RepositoryError),
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
