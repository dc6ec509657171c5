//! # API Client
//!
//! 所有后端请求都经过 [`ApiClient::request`]：注入令牌、统一错误，
//! 并在 401 / 402 时执行会话边界跳转。

use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::navigation::{Navigator, BILLING_PATH, LOGIN_PATH};
use crate::session::Session;

use super::request::ApiRequest;

pub struct ApiClient {
    http: Client,
    config: ApiConfig,
    session: Arc<Session>,
    navigator: Arc<dyn Navigator>,
}

impl ApiClient {
    pub fn new(config: ApiConfig, session: Arc<Session>, navigator: Arc<dyn Navigator>) -> Self {
        Self::with_http_client(Client::new(), config, session, navigator)
    }

    /// 使用自定义的 reqwest 客户端（例如带超时）
    pub fn with_http_client(
        http: Client,
        config: ApiConfig,
        session: Arc<Session>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        ApiClient {
            http,
            config,
            session,
            navigator,
        }
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn session(&self) -> &Arc<Session> {
        &self.session
    }

    pub(crate) fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// 基础请求
    ///
    /// 返回解析后的 JSON；204 或空响应体返回 `None`。
    /// 状态码按 401 → 402 → 其他失败 → 成功 的固定顺序处理。
    #[tracing::instrument(skip(self, req), fields(method = %req.method, path = %req.path))]
    pub async fn request(&self, req: ApiRequest) -> Result<Option<Value>, ApiError> {
        let start = Instant::now();
        let headers = self.compose_headers(&req.headers);

        let mut builder = self
            .http
            .request(req.method.clone(), self.config.url(&req.path))
            .headers(headers);
        if !req.query.is_empty() {
            builder = builder.query(&req.query);
        }
        if let Some(body) = &req.body {
            let bytes = serde_json::to_vec(body).map_err(|e| {
                ApiError::request_failed(None, format!("Failed to encode request: {}", e))
            })?;
            builder = builder.body(bytes);
        }

        tracing::debug!("Dispatching request");
        let response = builder.send().await.map_err(|e| {
            tracing::error!(error = %e, "Network error");
            ApiError::from(e)
        })?;

        let status = response.status();
        let duration_ms = start.elapsed().as_millis() as u64;

        if status == StatusCode::UNAUTHORIZED {
            tracing::warn!(duration_ms, "Session expired, redirecting to login");
            if let Err(e) = self.session.clear_token() {
                tracing::warn!(error = %e, "Failed to clear persisted token");
            }
            self.navigator.navigate(LOGIN_PATH);
            return Err(ApiError::SessionExpired);
        }

        if status == StatusCode::PAYMENT_REQUIRED {
            tracing::warn!(duration_ms, "Subscription required, redirecting to billing");
            self.navigator.navigate(BILLING_PATH);
            return Err(ApiError::SubscriptionRequired);
        }

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = error_message(status, &body);
            tracing::warn!(status = status.as_u16(), duration_ms, error = %message, "Request failed");
            return Err(ApiError::request_failed(Some(status.as_u16()), message));
        }

        if status == StatusCode::NO_CONTENT {
            tracing::info!(status = status.as_u16(), duration_ms, "Request completed");
            return Ok(None);
        }

        let body = response.text().await.map_err(|e| {
            ApiError::request_failed(Some(status.as_u16()), format!("Failed to read response: {}", e))
        })?;
        tracing::info!(status = status.as_u16(), duration_ms, "Request completed");

        if body.trim().is_empty() {
            return Ok(None);
        }

        serde_json::from_str(&body).map(Some).map_err(|e| {
            ApiError::request_failed(
                Some(status.as_u16()),
                format!("Failed to parse response: {}", e),
            )
        })
    }

    /// 与 `request` 相同，但把空响应折叠为 `Value::Null`
    pub(crate) async fn send(&self, req: ApiRequest) -> Result<Value, ApiError> {
        Ok(self.request(req).await?.unwrap_or(Value::Null))
    }

    /// JSON 内容类型，然后是调用方的请求头，最后是令牌（调用方无法覆盖）
    fn compose_headers(&self, extra: &[(String, String)]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        for (name, value) in extra {
            let parsed = (
                HeaderName::from_bytes(name.as_bytes()),
                HeaderValue::from_str(value),
            );
            match parsed {
                (Ok(name), _) if name == AUTHORIZATION => {
                    tracing::debug!("Ignoring caller-supplied authorization header");
                }
                (Ok(name), Ok(value)) => {
                    headers.insert(name, value);
                }
                _ => tracing::warn!(header = %name, "Skipping invalid header"),
            }
        }

        if let Some(token) = self.session.token() {
            match HeaderValue::from_str(&format!("Bearer {}", token)) {
                Ok(mut value) => {
                    value.set_sensitive(true);
                    headers.insert(AUTHORIZATION, value);
                }
                Err(_) => tracing::warn!("Stored token is not a valid header value"),
            }
        }

        headers
    }
}

/// 从错误响应体中取出可读信息，解析失败时退回到带状态码的通用信息
fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|value| {
            ["detail", "message", "error"]
                .iter()
                .find_map(|key| value.get(*key).and_then(Value::as_str).map(str::to_string))
        })
        .unwrap_or_else(|| format!("Request failed ({})", status.as_u16()))
}
