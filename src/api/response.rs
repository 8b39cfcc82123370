// ==========================================
// 云安全基线管理系统 - 统一响应结构
// ==========================================
// 格式: { code, message, data }
// 成功: code = 0, message = "success"
// 失败: code ∈ {4004, 4000, 4009, 5000}，data 为空，message 必填
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use serde::{Deserialize, Serialize};
use tracing::error;

pub const SUCCESS_CODE: i32 = 0;
pub const SUCCESS_MESSAGE: &str = "success";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub code: i32,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// HTTP 状态提示
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            code: SUCCESS_CODE,
            message: SUCCESS_MESSAGE.to_string(),
            data: Some(data),
            status: Some(200),
        }
    }

    pub fn failure(err: &ApiError) -> Self {
        if !err.is_client_error() {
            // 细节只进日志
            error!(error = %err, "请求处理失败");
        }
        Self {
            code: err.code(),
            message: err.public_message(),
            data: None,
            status: Some(err.status()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code == SUCCESS_CODE
    }
}

impl<T> From<ApiResult<T>> for ApiResponse<T> {
    fn from(result: ApiResult<T>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => Self::failure(&err),
        }
    }
}
