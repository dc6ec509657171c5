//! 注册、登录与个人资料

use serde_json::Value;

use crate::error::ApiError;
use crate::types::{AgentLogin, AgentRegister, AgentUpdate, AuthResponse};

use super::client::ApiClient;
use super::request::ApiRequest;

impl ApiClient {
    /// 注册新账号，成功后建立会话
    pub async fn register(&self, data: &AgentRegister) -> Result<AuthResponse, ApiError> {
        let value = self
            .send(ApiRequest::post("/api/agents/register").json(data)?)
            .await?;
        self.establish_session(value)
    }

    /// 登录，成功后令牌和资料都写入会话
    #[tracing::instrument(skip(self, password))]
    pub async fn login(&self, email: &str, password: &str) -> Result<AuthResponse, ApiError> {
        let body = AgentLogin {
            email: email.to_string(),
            password: password.to_string(),
        };
        let value = self
            .send(ApiRequest::post("/api/agents/login").json(&body)?)
            .await?;
        self.establish_session(value)
    }

    /// 退出登录，只清理本地状态
    pub fn logout(&self) -> Result<(), ApiError> {
        self.session()
            .logout()
            .map_err(|e| ApiError::Storage(format!("{:#}", e)))
    }

    pub async fn get_profile(&self) -> Result<Value, ApiError> {
        self.send(ApiRequest::get("/api/agents/me")).await
    }

    pub async fn update_profile(&self, data: &AgentUpdate) -> Result<Value, ApiError> {
        self.send(ApiRequest::patch("/api/agents/me").json(data)?)
            .await
    }

    fn establish_session(&self, value: Value) -> Result<AuthResponse, ApiError> {
        let auth: AuthResponse = serde_json::from_value(value).map_err(|e| {
            ApiError::request_failed(None, format!("Invalid auth response: {}", e))
        })?;

        let session = self.session();
        session
            .set_token(&auth.access_token)
            .map_err(|e| ApiError::Storage(format!("{:#}", e)))?;

        // 资料写入失败时撤销令牌，避免出现半登录状态
        if let Err(e) = session.set_agent(&auth.agent) {
            if let Err(rollback) = session.clear_token() {
                tracing::warn!(error = %rollback, "Failed to roll back token");
            }
            return Err(ApiError::Storage(format!("{:#}", e)));
        }

        tracing::info!("Session established");
        Ok(auth)
    }
}
