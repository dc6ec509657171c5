//! 线索管理与 AI 资格评估

use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::types::{IncomingMessage, LeadCreate, LeadFilter, LeadUpdate};

use super::client::ApiClient;
use super::request::ApiRequest;

impl ApiClient {
    pub async fn list_leads(&self, filter: &LeadFilter) -> Result<Value, ApiError> {
        self.send(ApiRequest::get("/api/leads/").query(filter)?)
            .await
    }

    pub async fn get_lead(&self, id: Uuid) -> Result<Value, ApiError> {
        self.send(ApiRequest::get(format!("/api/leads/{}", id)))
            .await
    }

    pub async fn create_lead(&self, data: &LeadCreate) -> Result<Value, ApiError> {
        self.send(ApiRequest::post("/api/leads/").json(data)?)
            .await
    }

    pub async fn update_lead(&self, id: Uuid, data: &LeadUpdate) -> Result<Value, ApiError> {
        self.send(ApiRequest::patch(format!("/api/leads/{}", id)).json(data)?)
            .await
    }

    pub async fn delete_lead(&self, id: Uuid) -> Result<(), ApiError> {
        self.request(ApiRequest::delete(format!("/api/leads/{}", id)))
            .await
            .map(|_| ())
    }

    /// 把线索的一条消息交给 AI 评估，返回回复与最新评分
    pub async fn qualify_lead(&self, id: Uuid, message: &IncomingMessage) -> Result<Value, ApiError> {
        self.send(ApiRequest::post(format!("/api/leads/{}/qualify", id)).json(message)?)
            .await
    }

    pub async fn list_messages(&self, id: Uuid) -> Result<Value, ApiError> {
        self.send(ApiRequest::get(format!("/api/leads/{}/messages", id)))
            .await
    }

    pub async fn get_stats(&self) -> Result<Value, ApiError> {
        self.send(ApiRequest::get("/api/leads/stats/overview"))
            .await
    }

    pub async fn list_conversations(&self) -> Result<Value, ApiError> {
        self.send(ApiRequest::get("/api/conversations/"))
            .await
    }
}
