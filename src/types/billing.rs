use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Plan {
    Starter,
    Pro,
    Team,
}

wire_enum!(Plan {
    Starter => "starter",
    Pro => "pro",
    Team => "team",
});

/// 成功 / 取消地址不填时由后端使用默认值
#[derive(Debug, Clone, Serialize)]
pub struct CheckoutRequest {
    pub plan: Plan,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub success_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cancel_url: Option<String>,
}

impl CheckoutRequest {
    pub fn new(plan: Plan) -> Self {
        CheckoutRequest {
            plan,
            success_url: None,
            cancel_url: None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct PortalRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub return_url: Option<String>,
}
