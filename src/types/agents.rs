use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize)]
pub struct AgentRegister {
    pub email: String,
    pub password: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brokerage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AgentLogin {
    pub email: String,
    pub password: String,
}

/// 资料更新，只发送设置了的字段
#[derive(Debug, Clone, Default, Serialize)]
pub struct AgentUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brokerage: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub license_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(rename = "ai_greeting_style", skip_serializing_if = "Option::is_none")]
    pub greeting_style: Option<String>,
    #[serde(rename = "ai_auto_reply_enabled", skip_serializing_if = "Option::is_none")]
    pub auto_reply: Option<bool>,
    #[serde(rename = "ai_hot_lead_score_threshold", skip_serializing_if = "Option::is_none")]
    pub hot_lead_threshold: Option<i32>,
    #[serde(rename = "notify_hot_lead_sms", skip_serializing_if = "Option::is_none")]
    pub notify_sms: Option<bool>,
    #[serde(rename = "notify_hot_lead_email", skip_serializing_if = "Option::is_none")]
    pub notify_email: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_daily_summary: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notify_summary_time: Option<String>,
}

/// 登录 / 注册的响应，`agent` 原样透传
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
    #[serde(default)]
    pub agent: Value,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn update_uses_backend_field_names_and_skips_unset() {
        let update = AgentUpdate {
            auto_reply: Some(false),
            hot_lead_threshold: Some(80),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({"ai_auto_reply_enabled": false, "ai_hot_lead_score_threshold": 80})
        );
    }

    #[test]
    fn auth_response_tolerates_missing_token_type() {
        let resp: AuthResponse =
            serde_json::from_value(json!({"access_token": "t1", "agent": {"full_name": "A"}}))
                .unwrap();
        assert_eq!(resp.token_type, "bearer");
        assert_eq!(resp.agent["full_name"], "A");
    }
}
