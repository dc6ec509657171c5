use realboost::session::{AGENT_KEY, TOKEN_KEY};
use realboost::types::{
    AdPlatform, AgentRegister, IncomingMessage, LeadFilter, LeadSource, LeadStatus, MessageChannel,
    Plan, StepCreate,
};
use realboost::{ApiClient, ApiConfig, FileStore, KeyValueStore, RecordingNavigator, Session};
use serde_json::json;
use std::sync::Arc;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

mod common;
use common::TestContext;

#[tokio::test]
async fn login_stores_token_and_profile_then_authenticates_calls() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/api/agents/login"))
        .and(body_json(json!({"email": "a@b.co", "password": "pw"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "t1",
            "token_type": "bearer",
            "agent": {"full_name": "A"}
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/leads/stats/overview"))
        .and(header("authorization", "Bearer t1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"hot": 2})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let auth = ctx.client.login("a@b.co", "pw").await.unwrap();
    assert_eq!(auth.access_token, "t1");
    assert_eq!(auth.agent, json!({"full_name": "A"}));

    assert_eq!(ctx.session.token().as_deref(), Some("t1"));
    assert_eq!(ctx.persisted_token().as_deref(), Some("t1"));
    assert_eq!(ctx.session.agent(), Some(json!({"full_name": "A"})));

    assert_eq!(ctx.client.get_stats().await.unwrap(), json!({"hot": 2}));
}

#[tokio::test]
async fn register_sends_only_provided_fields() {
    let ctx = TestContext::new().await;

    Mock::given(method("POST"))
        .and(path("/api/agents/register"))
        .and(body_json(json!({
            "email": "new@agent.co",
            "password": "secret",
            "full_name": "New Agent",
            "brokerage": "Coastal Realty"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "access_token": "fresh",
            "agent": {"full_name": "New Agent", "subscription_status": "trialing"}
        })))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let data = AgentRegister {
        email: "new@agent.co".into(),
        password: "secret".into(),
        full_name: "New Agent".into(),
        phone: None,
        brokerage: Some("Coastal Realty".into()),
        location: None,
    };
    let auth = ctx.client.register(&data).await.unwrap();

    assert_eq!(auth.token_type, "bearer");
    assert_eq!(ctx.persisted_token().as_deref(), Some("fresh"));
    assert_eq!(ctx.session.agent().unwrap()["subscription_status"], "trialing");
}

#[tokio::test]
async fn logout_clears_token_and_profile() {
    let ctx = TestContext::with_token(Some("t1")).await;
    ctx.session.set_agent(&json!({"full_name": "A"})).unwrap();

    ctx.client.logout().unwrap();
    ctx.client.logout().unwrap();

    assert_eq!(ctx.session.token(), None);
    assert_eq!(ctx.store.get(TOKEN_KEY), None);
    assert_eq!(ctx.store.get(AGENT_KEY), None);
}

#[tokio::test]
async fn list_leads_encodes_filters_as_query() {
    let ctx = TestContext::with_token(Some("t1")).await;

    Mock::given(method("GET"))
        .and(path("/api/leads/"))
        .and(query_param("status", "hot"))
        .and(query_param("source", "meta"))
        .and(query_param("search", "ocean view"))
        .and(query_param("limit", "25"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"first_name": "Dana"}])))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let filter = LeadFilter {
        status: Some(LeadStatus::Hot),
        source: Some(LeadSource::Meta),
        search: Some("ocean view".into()),
        limit: Some(25),
        ..Default::default()
    };
    let leads = ctx.client.list_leads(&filter).await.unwrap();
    assert_eq!(leads, json!([{"first_name": "Dana"}]));

    let requests = ctx.server.received_requests().await.unwrap();
    let query = requests[0].url.query().unwrap_or_default().to_string();
    assert!(!query.contains("offset"));
    assert!(!query.contains("sort_by"));
}

#[tokio::test]
async fn delete_lead_accepts_no_content() {
    let ctx = TestContext::with_token(Some("t1")).await;
    let id = Uuid::new_v4();

    Mock::given(method("DELETE"))
        .and(path(format!("/api/leads/{}", id)))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&ctx.server)
        .await;

    ctx.client.delete_lead(id).await.unwrap();
}

#[tokio::test]
async fn qualify_lead_posts_message_with_channel() {
    let ctx = TestContext::with_token(Some("t1")).await;
    let id = Uuid::new_v4();

    Mock::given(method("POST"))
        .and(path(format!("/api/leads/{}/qualify", id)))
        .and(body_json(json!({"content": "Looking for a 3 bed", "channel": "sms"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"ai_response": "Great!", "score": 72})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let message = IncomingMessage {
        content: "Looking for a 3 bed".into(),
        channel: MessageChannel::Sms,
    };
    let reply = ctx.client.qualify_lead(id, &message).await.unwrap();
    assert_eq!(reply["score"], 72);
}

#[tokio::test]
async fn campaign_step_and_enrollment_bodies() {
    let ctx = TestContext::with_token(Some("t1")).await;
    let campaign = Uuid::new_v4();
    let leads = vec![Uuid::new_v4(), Uuid::new_v4()];

    Mock::given(method("POST"))
        .and(path(format!("/api/campaigns/{}/steps", campaign)))
        .and(body_json(json!({
            "step_order": 1,
            "delay_days": 0,
            "subject": "Welcome",
            "body_html": "<p>Hello</p>"
        })))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "step-1"})))
        .expect(1)
        .mount(&ctx.server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/campaigns/{}/enroll", campaign)))
        .and(body_json(json!({"lead_ids": [leads[0], leads[1]]})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"enrolled": 2})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let step = StepCreate {
        order: 1,
        delay_days: 0,
        subject: "Welcome".into(),
        body_html: "<p>Hello</p>".into(),
    };
    ctx.client.add_campaign_step(campaign, &step).await.unwrap();
    let enrolled = ctx.client.enroll_leads(campaign, &leads).await.unwrap();
    assert_eq!(enrolled["enrolled"], 2);
}

#[tokio::test]
async fn update_budget_targets_platform_path() {
    let ctx = TestContext::with_token(Some("t1")).await;

    Mock::given(method("PATCH"))
        .and(path("/api/ads/accounts/google/budget"))
        .and(body_json(json!({"platform": "google", "monthly_budget": 750.0})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "updated"})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let result = ctx
        .client
        .update_budget(AdPlatform::Google, 750.0)
        .await
        .unwrap();
    assert_eq!(result["status"], "updated");
}

#[tokio::test]
async fn platform_performance_uses_platform_segment() {
    let ctx = TestContext::with_token(Some("t1")).await;

    Mock::given(method("GET"))
        .and(path("/api/ads/tiktok/performance"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"platform": "tiktok"})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let perf = ctx
        .client
        .get_platform_performance(AdPlatform::Tiktok)
        .await
        .unwrap();
    assert_eq!(perf["platform"], "tiktok");
}

#[tokio::test]
async fn checkout_navigates_to_hosted_page_and_returns_response() {
    let ctx = TestContext::with_token(Some("t1")).await;
    let body = json!({"url": "https://pay.example/x", "type": "checkout", "session_id": "cs_1"});

    Mock::given(method("POST"))
        .and(path("/api/billing/checkout"))
        .and(body_json(json!({"plan": "pro"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&ctx.server)
        .await;

    let response = ctx.client.start_checkout(Plan::Pro).await.unwrap();
    assert_eq!(response, body);
    assert_eq!(ctx.navigator.last().as_deref(), Some("https://pay.example/x"));
}

#[tokio::test]
async fn portal_navigates_when_url_present() {
    let ctx = TestContext::with_token(Some("t1")).await;

    Mock::given(method("POST"))
        .and(path("/api/billing/portal"))
        .and(body_json(json!({})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"url": "https://billing.example/p"})))
        .expect(1)
        .mount(&ctx.server)
        .await;

    ctx.client.open_portal().await.unwrap();
    assert_eq!(ctx.navigator.history(), vec!["https://billing.example/p".to_string()]);
}

#[tokio::test]
async fn checkout_without_url_does_not_navigate() {
    let ctx = TestContext::with_token(Some("t1")).await;

    Mock::given(method("POST"))
        .and(path("/api/billing/checkout"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"type": "checkout"})))
        .mount(&ctx.server)
        .await;

    ctx.client.start_checkout(Plan::Starter).await.unwrap();
    assert!(ctx.navigator.history().is_empty());
}

#[tokio::test]
async fn file_backed_session_survives_restart() {
    let ctx = TestContext::new().await;
    let dir = tempfile::tempdir().unwrap();
    let store_path = dir.path().join("session.json");

    Mock::given(method("POST"))
        .and(path("/api/agents/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "persisted-token",
            "agent": {"full_name": "A", "subscription_plan": "team"}
        })))
        .mount(&ctx.server)
        .await;

    {
        let session = Arc::new(Session::new(Arc::new(FileStore::open(&store_path))));
        let client = ApiClient::new(
            ApiConfig::new(ctx.server.uri()),
            session,
            Arc::new(RecordingNavigator::new()),
        );
        client.login("a@b.co", "pw").await.unwrap();
    }

    let restored = Session::new(Arc::new(FileStore::open(&store_path)));
    assert_eq!(restored.token().as_deref(), Some("persisted-token"));
    assert_eq!(restored.agent().unwrap()["subscription_plan"], "team");
}
