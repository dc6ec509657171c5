//! # Backend API Client
//!
//! ```text
//! api/
//! ├── client.rs     - ApiClient 与基础请求
//! ├── request.rs    - 请求描述
//! ├── agents.rs     - 注册、登录、资料
//! ├── leads.rs      - 线索、消息、统计、会话
//! ├── campaigns.rs  - 邮件活动与 AI 生成
//! ├── ads.rs        - 广告效果、优化、账户
//! └── billing.rs    - 套餐、订阅、支付页面
//! ```

pub mod agents;
pub mod ads;
pub mod billing;
pub mod campaigns;
pub mod client;
pub mod leads;
pub mod request;

pub use client::ApiClient;
pub use request::ApiRequest;
