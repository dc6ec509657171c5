#![allow(dead_code)]

use std::sync::Arc;

use realboost::session::TOKEN_KEY;
use realboost::{ApiClient, ApiConfig, KeyValueStore, MemoryStore, RecordingNavigator, Session};
use wiremock::MockServer;

pub struct TestContext {
    pub server: MockServer,
    pub client: ApiClient,
    pub session: Arc<Session>,
    pub store: Arc<MemoryStore>,
    pub navigator: Arc<RecordingNavigator>,
}

impl TestContext {
    pub async fn new() -> Self {
        Self::with_token(None).await
    }

    /// 令牌预先写入存储，模拟进程启动时恢复会话
    pub async fn with_token(token: Option<&str>) -> Self {
        let server = MockServer::start().await;
        let store = Arc::new(MemoryStore::new());
        if let Some(token) = token {
            store.set(TOKEN_KEY, token).unwrap();
        }
        let session = Arc::new(Session::new(store.clone()));
        let navigator = Arc::new(RecordingNavigator::new());
        let client = ApiClient::new(
            ApiConfig::new(server.uri()),
            session.clone(),
            navigator.clone(),
        );

        TestContext {
            server,
            client,
            session,
            store,
            navigator,
        }
    }

    pub fn persisted_token(&self) -> Option<String> {
        self.store.get(TOKEN_KEY)
    }
}
