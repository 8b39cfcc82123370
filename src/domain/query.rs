// ==========================================
// 云安全基线管理系统 - 查询类型
// ==========================================
// 职责: 配置项过滤条件、分页结果封装
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 查询参数名
pub mod param_keys {
    pub const PROVIDER_ID: &str = "cloud_provider_id";
    pub const PRODUCT_ID: &str = "product_id";
    pub const KEYWORD: &str = "keyword";
    pub const PAGE: &str = "page";
    pub const PAGE_SIZE: &str = "page_size";
}

// ==========================================
// ConfigItemFilter - 调用方过滤条件
// ==========================================
// page/page_size 为原始请求值，由分页引擎归一化
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigItemFilter {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cloud_provider_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keyword: Option<String>,
    #[serde(default = "default_page")]
    pub page: i64,
    #[serde(default = "default_page_size")]
    pub page_size: i64,
}

fn default_page() -> i64 {
    1
}

fn default_page_size() -> i64 {
    10
}

impl Default for ConfigItemFilter {
    fn default() -> Self {
        Self {
            cloud_provider_id: None,
            product_id: None,
            keyword: None,
            page: default_page(),
            page_size: default_page_size(),
        }
    }
}

impl ConfigItemFilter {
    pub fn with_provider(mut self, provider_id: i64) -> Self {
        self.cloud_provider_id = Some(provider_id);
        self
    }

    pub fn with_product(mut self, product_id: i64) -> Self {
        self.product_id = Some(product_id);
        self
    }

    pub fn with_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.keyword = Some(keyword.into());
        self
    }

    pub fn with_page(mut self, page: i64, page_size: i64) -> Self {
        self.page = page;
        self.page_size = page_size;
        self
    }

    /// 从 URL 查询参数构造过滤条件
    ///
    /// # 规则
    /// - page / page_size 解析失败时使用默认值（1 / 10）
    /// - cloud_provider_id / product_id 须为非负整数，否则视为未提供
    /// - keyword 为空白时视为未提供
    pub fn from_query(params: &HashMap<String, String>) -> Self {
        let int_or = |key: &str, default: i64| {
            params
                .get(key)
                .map(|v| v.trim())
                .filter(|v| !v.is_empty())
                .and_then(|v| v.parse::<i64>().ok())
                .unwrap_or(default)
        };
        let id = |key: &str| {
            params
                .get(key)
                .and_then(|v| v.trim().parse::<u32>().ok())
                .map(i64::from)
        };

        Self {
            cloud_provider_id: id(param_keys::PROVIDER_ID),
            product_id: id(param_keys::PRODUCT_ID),
            keyword: params
                .get(param_keys::KEYWORD)
                .filter(|v| !v.trim().is_empty())
                .cloned(),
            page: int_or(param_keys::PAGE, default_page()),
            page_size: int_or(param_keys::PAGE_SIZE, default_page_size()),
        }
    }

    /// 提取仓储层查询条件（不含分页）
    pub fn criteria(&self) -> ConfigItemQuery {
        ConfigItemQuery {
            cloud_provider_id: self.cloud_provider_id,
            product_id: self.product_id,
            keyword: self
                .keyword
                .as_deref()
                .map(str::trim)
                .filter(|k| !k.is_empty())
                .map(str::to_string),
        }
    }
}

// ==========================================
// ConfigItemQuery - 仓储层查询条件
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigItemQuery {
    pub cloud_provider_id: Option<i64>,
    pub product_id: Option<i64>,
    pub keyword: Option<String>, // 已 trim，非空
}

// ==========================================
// PageResult - 分页结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageResult<T> {
    /// 过滤后的总记录数（忽略分页）
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub data: Vec<T>,
}
