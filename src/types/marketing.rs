use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignType {
    #[default]
    Nurture,
    Newsletter,
    Relationship,
    Reactivation,
    Announcement,
}

wire_enum!(CampaignType {
    Nurture => "nurture",
    Newsletter => "newsletter",
    Relationship => "relationship",
    Reactivation => "reactivation",
    Announcement => "announcement",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailType {
    #[default]
    Newsletter,
    Birthday,
    MarketUpdate,
    FollowUp,
    Reengagement,
}

wire_enum!(EmailType {
    Newsletter => "newsletter",
    Birthday => "birthday",
    MarketUpdate => "market_update",
    FollowUp => "follow_up",
    Reengagement => "reengagement",
});

#[derive(Debug, Clone, Default, Serialize)]
pub struct CampaignCreate {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub campaign_type: CampaignType,
    pub ai_generated: bool,
}

/// 活动中的一封邮件
#[derive(Debug, Clone, Serialize)]
pub struct StepCreate {
    #[serde(rename = "step_order")]
    pub order: u32,
    pub delay_days: u32,
    pub subject: String,
    pub body_html: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct EnrollRequest {
    pub lead_ids: Vec<Uuid>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EmailGenRequest {
    pub prompt: String,
    pub email_type: EmailType,
}

#[derive(Debug, Clone, Serialize)]
pub struct CampaignGenRequest {
    pub name: String,
    pub campaign_type: String,
    pub target_audience: String,
    pub num_emails: u32,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct NewsletterRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub market_data: Option<Value>,
}
