//! 邮件活动与 AI 内容生成

use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::types::{
    CampaignCreate, CampaignGenRequest, EmailGenRequest, EnrollRequest, NewsletterRequest,
    StepCreate,
};

use super::client::ApiClient;
use super::request::ApiRequest;

impl ApiClient {
    pub async fn list_campaigns(&self) -> Result<Value, ApiError> {
        self.send(ApiRequest::get("/api/campaigns/")).await
    }

    pub async fn create_campaign(&self, data: &CampaignCreate) -> Result<Value, ApiError> {
        self.send(ApiRequest::post("/api/campaigns/").json(data)?)
            .await
    }

    pub async fn add_campaign_step(&self, campaign_id: Uuid, step: &StepCreate) -> Result<Value, ApiError> {
        self.send(ApiRequest::post(format!("/api/campaigns/{}/steps", campaign_id)).json(step)?)
            .await
    }

    pub async fn enroll_leads(&self, campaign_id: Uuid, lead_ids: &[Uuid]) -> Result<Value, ApiError> {
        let body = EnrollRequest {
            lead_ids: lead_ids.to_vec(),
        };
        self.send(ApiRequest::post(format!("/api/campaigns/{}/enroll", campaign_id)).json(&body)?)
            .await
    }

    pub async fn generate_email(&self, data: &EmailGenRequest) -> Result<Value, ApiError> {
        self.send(ApiRequest::post("/api/ai/generate-email").json(data)?)
            .await
    }

    pub async fn generate_campaign(&self, data: &CampaignGenRequest) -> Result<Value, ApiError> {
        self.send(ApiRequest::post("/api/ai/generate-campaign").json(data)?)
            .await
    }

    pub async fn generate_newsletter(&self, data: &NewsletterRequest) -> Result<Value, ApiError> {
        self.send(ApiRequest::post("/api/ai/generate-newsletter").json(data)?)
            .await
    }
}
