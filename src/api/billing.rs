//! 订阅与付款
//!
//! `start_checkout` 和 `open_portal` 拿到 `url` 后会先导航到支付页面，再把原始响应返回。

use serde_json::Value;

use crate::error::ApiError;
use crate::types::{CheckoutRequest, Plan, PortalRequest};

use super::client::ApiClient;
use super::request::ApiRequest;

impl ApiClient {
    pub async fn get_billing_plans(&self) -> Result<Value, ApiError> {
        self.send(ApiRequest::get("/api/billing/plans")).await
    }

    pub async fn get_billing_status(&self) -> Result<Value, ApiError> {
        self.send(ApiRequest::get("/api/billing/status")).await
    }

    pub async fn start_checkout(&self, plan: Plan) -> Result<Value, ApiError> {
        self.start_checkout_with(&CheckoutRequest::new(plan)).await
    }

    pub async fn start_checkout_with(&self, data: &CheckoutRequest) -> Result<Value, ApiError> {
        let response = self
            .send(ApiRequest::post("/api/billing/checkout").json(data)?)
            .await?;
        self.follow_hosted_page(&response);
        Ok(response)
    }

    pub async fn open_portal(&self) -> Result<Value, ApiError> {
        self.open_portal_with(&PortalRequest::default()).await
    }

    pub async fn open_portal_with(&self, data: &PortalRequest) -> Result<Value, ApiError> {
        let response = self
            .send(ApiRequest::post("/api/billing/portal").json(data)?)
            .await?;
        self.follow_hosted_page(&response);
        Ok(response)
    }

    fn follow_hosted_page(&self, response: &Value) {
        if let Some(url) = response.get("url").and_then(Value::as_str) {
            tracing::info!(url = %url, "Redirecting to hosted billing page");
            self.navigator().navigate(url);
        }
    }
}
