// ==========================================
// 云安全基线管理系统 - API层错误类型
// ==========================================
// 职责: 下层错误 → 四类业务错误 + 响应码
// 约束: 存储故障对外只给通用提示，不泄露存储细节
// ==========================================

use crate::engine::IntegrityError;
use crate::exporter::ExportError;
use crate::importer::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 调用方错误
    // ==========================================
    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("无效数据: {0}")]
    InvalidData(String),

    #[error("数据重复: {0}")]
    Duplicate(String),

    // ==========================================
    // 服务端错误
    // ==========================================
    #[error("数据库错误: {0}")]
    StoreFailure(String),

    #[error("内部错误: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 业务响应码
    pub fn code(&self) -> i32 {
        match self {
            ApiError::NotFound(_) => 4004,
            ApiError::InvalidData(_) => 4000,
            ApiError::Duplicate(_) => 4009,
            ApiError::StoreFailure(_) | ApiError::Internal(_) | ApiError::Other(_) => 5000,
        }
    }

    /// HTTP 状态提示
    pub fn status(&self) -> u16 {
        match self {
            ApiError::NotFound(_) => 404,
            ApiError::InvalidData(_) => 400,
            ApiError::Duplicate(_) => 409,
            ApiError::StoreFailure(_) | ApiError::Internal(_) | ApiError::Other(_) => 500,
        }
    }

    /// 对外展示的消息
    pub fn public_message(&self) -> String {
        match self {
            ApiError::NotFound(msg) | ApiError::InvalidData(msg) | ApiError::Duplicate(msg) => {
                msg.clone()
            }
            ApiError::StoreFailure(_) | ApiError::Internal(_) | ApiError::Other(_) => {
                "服务器内部错误".to_string()
            }
        }
    }

    pub fn is_client_error(&self) -> bool {
        self.code() < 5000
    }

    /// 带操作上下文包装存储错误
    pub fn store(operation: &str, err: RepositoryError) -> Self {
        if err.is_unique_violation() || matches!(err, RepositoryError::NotFound { .. }) {
            return err.into();
        }
        ApiError::StoreFailure(format!("{}: {}", operation, err))
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::Duplicate(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::DatabaseConnectionError(msg)
            | RepositoryError::DatabaseTransactionError(msg)
            | RepositoryError::DatabaseQueryError(msg)
            | RepositoryError::ForeignKeyViolation(msg) => ApiError::StoreFailure(msg),
            RepositoryError::LockError(msg) => {
                ApiError::StoreFailure(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::InternalError(msg) => ApiError::Internal(msg),
        }
    }
}

// ==========================================
// 从 IntegrityError 转换
// ==========================================
impl From<IntegrityError> for ApiError {
    fn from(err: IntegrityError) -> Self {
        match err {
            IntegrityError::ProviderNotFound(_) => ApiError::NotFound("云服务商不存在".to_string()),
            IntegrityError::ProductNotFound(_) => ApiError::NotFound("云产品不存在".to_string()),
            IntegrityError::ProductProviderMismatch { .. } => {
                ApiError::InvalidData("产品不属于指定的云服务商".to_string())
            }
            IntegrityError::Store(e) => e.into(),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::RowRejected {
                position,
                line,
                source,
            } => {
                let prefix = format!("批量导入配置项失败：第{}条记录（文件第{}行）", position, line);
                match source {
                    IntegrityError::Store(e) => e.into(),
                    IntegrityError::ProviderNotFound(_) => {
                        ApiError::NotFound(format!("{}的云服务商不存在", prefix))
                    }
                    IntegrityError::ProductNotFound(_) => {
                        ApiError::NotFound(format!("{}的云产品不存在", prefix))
                    }
                    IntegrityError::ProductProviderMismatch { .. } => ApiError::InvalidData(
                        format!("{}的云产品不属于指定的云服务商", prefix),
                    ),
                }
            }
            ImportError::Persist(e) => ApiError::StoreFailure(format!("批量导入配置项失败: {}", e)),
            ImportError::Staging(e) => ApiError::Internal(format!("暂存上传文件失败: {}", e)),
            other => ApiError::InvalidData(format!("解析导入文件失败：{}", other)),
        }
    }
}

// ==========================================
// 从 ExportError 转换
// ==========================================
impl From<ExportError> for ApiError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::NoData => ApiError::InvalidData("没有可导出的数据".to_string()),
            other => ApiError::Internal(format!("导出失败: {}", other)),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;
