// ==========================================
// 云安全基线管理系统 - 引擎层错误类型
// ==========================================

use crate::repository::RepositoryError;
use thiserror::Error;

/// 引用完整性错误
///
/// 校验顺序固定: 服务商 → 产品 → 归属一致性
#[derive(Error, Debug)]
pub enum IntegrityError {
    #[error("云服务商不存在: id={0}")]
    ProviderNotFound(i64),

    #[error("云产品不存在: id={0}")]
    ProductNotFound(i64),

    #[error(
        "产品不属于该云服务商: product_id={product_id}, provider_id={provider_id}, 实际归属={owner_provider_id}"
    )]
    ProductProviderMismatch {
        product_id: i64,
        provider_id: i64,
        owner_provider_id: i64,
    },

    #[error("存储访问失败: {0}")]
    Store(#[from] RepositoryError),
}

impl IntegrityError {
    /// 是否为“引用不存在”类错误
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            IntegrityError::ProviderNotFound(_) | IntegrityError::ProductNotFound(_)
        )
    }
}

pub type IntegrityResult<T> = Result<T, IntegrityError>;
