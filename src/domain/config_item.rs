// ==========================================
// 云安全基线管理系统 - 安全配置项领域模型
// ==========================================
// 对齐: configuration_items 表
// 红线: (cloud_provider_id, product_id) 必须相互一致
//       即 product.cloud_provider_id == item.cloud_provider_id
// ==========================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ==========================================
// ConfigItem - 安全配置项
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigItem {
    // ===== 主键与关联 =====
    pub id: i64,
    pub cloud_provider_id: i64,
    pub product_id: i64,

    // ===== 基线内容 =====
    pub name: String,                 // 配置项名称
    pub recommended_value: String,    // 推荐配置值
    pub risk_description: String,     // 风险说明
    pub check_method: String,         // 检查方法
    pub configuration_method: String, // 配置方式
    pub reference: String,            // 参考资料

    // ===== 审计字段 =====
    pub created_at: DateTime<Utc>, // 插入时写入，之后不变
    pub updated_at: DateTime<Utc>, // 每次成功变更时刷新
}

// ==========================================
// ConfigItemInput - 写入结构
// ==========================================
// 用途: 创建、整体替换式更新、导入候选行
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigItemInput {
    pub cloud_provider_id: i64,
    pub product_id: i64,
    pub name: String,
    pub recommended_value: String,
    #[serde(default)]
    pub risk_description: String,
    #[serde(default)]
    pub check_method: String,
    #[serde(default)]
    pub configuration_method: String,
    #[serde(default)]
    pub reference: String,
}

impl ConfigItemInput {
    pub fn new(cloud_provider_id: i64, product_id: i64, name: impl Into<String>) -> Self {
        Self {
            cloud_provider_id,
            product_id,
            name: name.into(),
            ..Default::default()
        }
    }

    /// 内容字段元组（不含关联 ID），用于导出/导入往返比对
    pub fn content(&self) -> (&str, &str, &str, &str, &str, &str) {
        (
            &self.name,
            &self.recommended_value,
            &self.risk_description,
            &self.check_method,
            &self.configuration_method,
            &self.reference,
        )
    }
}

impl From<&ConfigItem> for ConfigItemInput {
    fn from(item: &ConfigItem) -> Self {
        Self {
            cloud_provider_id: item.cloud_provider_id,
            product_id: item.product_id,
            name: item.name.clone(),
            recommended_value: item.recommended_value.clone(),
            risk_description: item.risk_description.clone(),
            check_method: item.check_method.clone(),
            configuration_method: item.configuration_method.clone(),
            reference: item.reference.clone(),
        }
    }
}

// ==========================================
// ConfigItemDetail - 配置项 + 关联展示名
// ==========================================
// 说明: 删除服务商/产品不级联，关联名可能缺失
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConfigItemDetail {
    #[serde(flatten)]
    pub item: ConfigItem,
    pub provider_name: Option<String>,
    pub product_name: Option<String>,
}
