// ==========================================
// 云安全基线管理系统 - 云服务商领域模型
// ==========================================
// 对齐: cloud_providers 表
// 约束: code 全局唯一
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// 云服务商
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Provider {
    pub id: i64,
    pub name: String,
    pub code: String, // 全局唯一
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// 云服务商写入结构（创建/整体更新）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProviderInput {
    pub name: String,
    pub code: String,
    #[serde(default)]
    pub description: String,
}

impl ProviderInput {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            description: String::new(),
        }
    }

    /// 去除首尾空白
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            code: self.code.trim().to_string(),
            description: self.description.trim().to_string(),
        }
    }
}
