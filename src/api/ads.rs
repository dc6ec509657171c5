//! 广告平台：效果、预算优化与账户

use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;
use crate::types::{AdAccountConnect, AdCampaignCreate, AdPlatform, BudgetUpdate};

use super::client::ApiClient;
use super::request::ApiRequest;

impl ApiClient {
    /// 所有已连接平台的汇总效果
    pub async fn get_ad_performance(&self) -> Result<Value, ApiError> {
        self.send(ApiRequest::get("/api/ads/performance")).await
    }

    pub async fn get_platform_performance(&self, platform: AdPlatform) -> Result<Value, ApiError> {
        self.send(ApiRequest::get(format!("/api/ads/{}/performance", platform)))
            .await
    }

    /// 请求 AI 给出预算调整建议，响应中带 `log_id`
    pub async fn run_optimization(&self) -> Result<Value, ApiError> {
        self.send(ApiRequest::post("/api/ads/optimize")).await
    }

    pub async fn apply_optimization(&self, log_id: Uuid) -> Result<Value, ApiError> {
        self.send(ApiRequest::post(format!("/api/ads/optimize/{}/apply", log_id)))
            .await
    }

    pub async fn list_ad_accounts(&self) -> Result<Value, ApiError> {
        self.send(ApiRequest::get("/api/ads/accounts")).await
    }

    pub async fn connect_ad_account(&self, data: &AdAccountConnect) -> Result<Value, ApiError> {
        self.send(ApiRequest::post("/api/ads/accounts/connect").json(data)?)
            .await
    }

    pub async fn update_budget(&self, platform: AdPlatform, monthly_budget: f64) -> Result<Value, ApiError> {
        let body = BudgetUpdate {
            platform,
            monthly_budget,
        };
        self.send(ApiRequest::patch(format!("/api/ads/accounts/{}/budget", platform)).json(&body)?)
            .await
    }

    pub async fn create_meta_campaign(&self, data: &AdCampaignCreate) -> Result<Value, ApiError> {
        self.send(ApiRequest::post("/api/ads/meta/campaigns").json(data)?)
            .await
    }
}
