use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdPlatform {
    Meta,
    Google,
    Tiktok,
    Waze,
}

wire_enum!(AdPlatform {
    Meta => "meta",
    Google => "google",
    Tiktok => "tiktok",
    Waze => "waze",
});

#[derive(Debug, Clone, Serialize)]
pub struct AdAccountConnect {
    pub platform: AdPlatform,
    pub access_token: String,
    pub account_id: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct BudgetUpdate {
    pub platform: AdPlatform,
    pub monthly_budget: f64,
}

/// Meta 广告活动
#[derive(Debug, Clone, Serialize)]
pub struct AdCampaignCreate {
    pub platform: AdPlatform,
    pub name: String,
    pub objective: String,
    pub daily_budget: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_location: Option<String>,
    #[serde(rename = "target_radius_miles")]
    pub radius_miles: u32,
    pub age_min: u32,
    pub age_max: u32,
    #[serde(rename = "ad_creative_headline", skip_serializing_if = "Option::is_none")]
    pub headline: Option<String>,
    #[serde(rename = "ad_creative_body", skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl AdCampaignCreate {
    pub fn new(name: impl Into<String>, daily_budget: f64) -> Self {
        AdCampaignCreate {
            platform: AdPlatform::Meta,
            name: name.into(),
            objective: "LEAD_GENERATION".to_string(),
            daily_budget,
            target_location: None,
            radius_miles: 25,
            age_min: 25,
            age_max: 65,
            headline: None,
            body: None,
        }
    }
}
