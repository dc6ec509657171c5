use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadStatus {
    New,
    Cold,
    Warm,
    Hot,
    Converted,
    Lost,
}

wire_enum!(LeadStatus {
    New => "new",
    Cold => "cold",
    Warm => "warm",
    Hot => "hot",
    Converted => "converted",
    Lost => "lost",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeadSource {
    Meta,
    Google,
    Tiktok,
    Waze,
    Referral,
    #[default]
    Manual,
    Organic,
}

wire_enum!(LeadSource {
    Meta => "meta",
    Google => "google",
    Tiktok => "tiktok",
    Waze => "waze",
    Referral => "referral",
    Manual => "manual",
    Organic => "organic",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageChannel {
    #[default]
    Chat,
    Sms,
    Email,
}

wire_enum!(MessageChannel {
    Chat => "chat",
    Sms => "sms",
    Email => "email",
});

/// 线索列表的查询参数，`None` 的字段不会出现在查询串里
#[derive(Debug, Clone, Default, Serialize)]
pub struct LeadFilter {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<LeadSource>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub limit: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub offset: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort_by: Option<String>,
}

impl LeadFilter {
    pub fn status(status: LeadStatus) -> Self {
        LeadFilter {
            status: Some(status),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LeadCreate {
    pub first_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    pub source: LeadSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_interest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "is_pre_approved", skip_serializing_if = "Option::is_none")]
    pub pre_approved: Option<bool>,
    #[serde(rename = "is_cash_buyer")]
    pub cash_buyer: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ad_campaign_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub utm_campaign: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct LeadUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<LeadStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget_max: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeline: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intent: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(rename = "is_pre_approved", skip_serializing_if = "Option::is_none")]
    pub pre_approved: Option<bool>,
    #[serde(rename = "is_cash_buyer", skip_serializing_if = "Option::is_none")]
    pub cash_buyer: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_situation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub urgency_level: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub birthday: Option<DateTime<Utc>>,
}

/// 交给 AI 资格评估的线索消息
#[derive(Debug, Clone, Serialize)]
pub struct IncomingMessage {
    pub content: String,
    pub channel: MessageChannel,
}

impl IncomingMessage {
    pub fn chat(content: impl Into<String>) -> Self {
        IncomingMessage {
            content: content.into(),
            channel: MessageChannel::Chat,
        }
    }
}
