//! 客户端错误类型
//!
//! 所有失败都以 [`ApiError`] 返回，`Display` 即展示给用户的文本。
//! 401 与 402 属于会话边界，除了返回错误还会触发导航。

use thiserror::Error;

pub const SESSION_EXPIRED: &str = "Session expired";
pub const SUBSCRIPTION_REQUIRED: &str = "Subscription required";

#[derive(Debug, Error)]
pub enum ApiError {
    /// 后端返回 401，令牌已被清除，只能重新登录
    #[error("Session expired")]
    SessionExpired,

    /// 后端返回 402，会话保留，完成付款后可恢复
    #[error("Subscription required")]
    SubscriptionRequired,

    /// 其余所有失败：非成功状态码、网络错误、无法解析的响应体
    #[error("{message}")]
    RequestFailed {
        status: Option<u16>,
        message: String,
    },

    /// 写入本地会话存储失败
    #[error("Storage error: {0}")]
    Storage(String),
}

impl ApiError {
    pub fn request_failed(status: Option<u16>, message: impl Into<String>) -> Self {
        ApiError::RequestFailed {
            status,
            message: message.into(),
        }
    }

    /// 触发该错误的 HTTP 状态码（网络错误没有状态码）
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::SessionExpired => Some(401),
            ApiError::SubscriptionRequired => Some(402),
            ApiError::RequestFailed { status, .. } => *status,
            ApiError::Storage(_) => None,
        }
    }

    pub fn is_session_boundary(&self) -> bool {
        matches!(self, ApiError::SessionExpired | ApiError::SubscriptionRequired)
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        ApiError::request_failed(err.status().map(|s| s.as_u16()), err.to_string())
    }
}
