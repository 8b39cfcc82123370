// ==========================================
// 云安全基线管理系统 - 云产品领域模型
// ==========================================
// 对齐: cloud_products 表
// 约束: (cloud_provider_id, code) 复合唯一；code 不要求全局唯一
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 云产品（归属唯一的云服务商）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub cloud_provider_id: i64,
    pub name: String,
    pub code: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 云产品写入结构（创建/整体更新）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProductInput {
    pub cloud_provider_id: i64,
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl ProductInput {
    pub fn new(cloud_provider_id: i64, name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            cloud_provider_id,
            name: name.into(),
            code: code.into(),
            description: String::new(),
        }
    }

    pub fn trimmed(self) -> Self {
        Self {
            cloud_provider_id: self.cloud_provider_id,
            name: self.name.trim().to_string(),
            code: self.code.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}
