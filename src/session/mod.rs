//! 会话：单个令牌槽位加上 agent 资料，两者都镜像到 [`KeyValueStore`]
//!
//! 每次修改先写存储，再写内存，保证修改成功后两份副本一致。

pub mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

use anyhow::{Context, Result};
use parking_lot::RwLock;
use serde_json::Value;
use std::sync::Arc;

pub const TOKEN_KEY: &str = "realboost_token";
pub const AGENT_KEY: &str = "realboost_agent";

pub struct Session {
    store: Arc<dyn KeyValueStore>,
    token: RwLock<Option<String>>,
}

impl Session {
    /// 创建会话，令牌只在此时从存储读取一次
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        let token = store.get(TOKEN_KEY);
        Session {
            store,
            token: RwLock::new(token),
        }
    }

    /// 纯内存会话
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.token.read().is_some()
    }

    pub fn set_token(&self, token: &str) -> Result<()> {
        let mut slot = self.token.write();
        self.store
            .set(TOKEN_KEY, token)
            .context("保存令牌失败")?;
        *slot = Some(token.to_string());
        Ok(())
    }

    /// 清除令牌，重复调用无副作用
    ///
    /// 与 `set_token` 一样先写存储；存储删除失败时内存槽位仍会清空并返回错误。
    pub fn clear_token(&self) -> Result<()> {
        let mut slot = self.token.write();
        let deleted = self.store.delete(TOKEN_KEY).context("删除令牌失败");
        *slot = None;
        deleted
    }

    /// 读取持久化的 agent 资料，内容损坏时视为不存在
    pub fn agent(&self) -> Option<Value> {
        self.store
            .get(AGENT_KEY)
            .and_then(|raw| serde_json::from_str(&raw).ok())
    }

    pub fn set_agent(&self, agent: &Value) -> Result<()> {
        let raw = serde_json::to_string(agent)?;
        self.store.set(AGENT_KEY, &raw).context("保存 agent 资料失败")
    }

    pub fn clear_agent(&self) -> Result<()> {
        self.store.delete(AGENT_KEY).context("删除 agent 资料失败")
    }

    /// 退出登录：令牌与资料一并清除
    pub fn logout(&self) -> Result<()> {
        self.clear_token()?;
        self.clear_agent()
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("authenticated", &self.is_authenticated())
            .finish()
    }
}
