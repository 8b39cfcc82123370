// ==========================================
// 云安全基线管理系统 - 分页归一化
// ==========================================
// 规则:
// - page <= 0 → 1
// - page_size <= 0 → 10
// - page_size > 100 → 100（导出同样受此上限约束）
// ==========================================

use serde::{Deserialize, Serialize};

pub const DEFAULT_PAGE: i64 = 1;
pub const DEFAULT_PAGE_SIZE: i64 = 10;
pub const MAX_PAGE_SIZE: i64 = 100;

/// 导出请求的页大小（归一化后仍为 MAX_PAGE_SIZE）
pub const EXPORT_PAGE_SIZE: i64 = 1000;

/// 归一化后的分页参数
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    pub page: i64,
    pub page_size: i64,
}

impl Pagination {
    pub fn normalize(page: i64, page_size: i64) -> Self {
        let page = if page <= 0 { DEFAULT_PAGE } else { page };
        let page_size = if page_size <= 0 {
            DEFAULT_PAGE_SIZE
        } else {
            page_size.min(MAX_PAGE_SIZE)
        };
        Self { page, page_size }
    }

    /// (page - 1) * page_size，溢出时饱和
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }

    pub fn limit(&self) -> i64 {
        self.page_size
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::normalize(DEFAULT_PAGE, DEFAULT_PAGE_SIZE)
    }
}
