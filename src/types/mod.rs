/// 为按 wire 名称序列化的枚举实现 `as_str` / `Display` / `FromStr`
macro_rules! wire_enum {
    ($name:ident { $($variant:ident => $wire:literal),+ $(,)? }) => {
        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $wire),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = anyhow::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.to_ascii_lowercase().as_str() {
                    $($wire => Ok($name::$variant),)+
                    other => Err(anyhow::anyhow!(
                        "无效的{}：{}（可选：{}）",
                        stringify!($name),
                        other,
                        [$($wire),+].join(", ")
                    )),
                }
            }
        }
    };
}

mod ads;
mod agents;
mod billing;
mod leads;
mod marketing;

pub use ads::{AdAccountConnect, AdCampaignCreate, AdPlatform, BudgetUpdate};
pub use agents::{AgentLogin, AgentRegister, AgentUpdate, AuthResponse};
pub use billing::{CheckoutRequest, Plan, PortalRequest};
pub use leads::{
    IncomingMessage, LeadCreate, LeadFilter, LeadSource, LeadStatus, LeadUpdate, MessageChannel,
};
pub use marketing::{
    CampaignCreate, CampaignGenRequest, CampaignType, EmailGenRequest, EmailType, EnrollRequest,
    NewsletterRequest, StepCreate,
};
