use parking_lot::Mutex;

pub const LOGIN_PATH: &str = "/login";
pub const SIGNUP_PATH: &str = "/signup";
pub const DASHBOARD_PATH: &str = "/dashboard";
pub const BILLING_PATH: &str = "/billing";

/// 导航回调，由展示层在构造客户端时注入
///
/// `target` 可以是应用内路径（如 [`LOGIN_PATH`]），也可以是外部 URL（支付页面）。
pub trait Navigator: Send + Sync {
    fn navigate(&self, target: &str);
}

/// 记录所有导航请求，不做任何实际跳转
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    history: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> Vec<String> {
        self.history.lock().clone()
    }

    pub fn last(&self) -> Option<String> {
        self.history.lock().last().cloned()
    }

    /// 取出并清空已记录的导航
    pub fn take(&self) -> Vec<String> {
        std::mem::take(&mut *self.history.lock())
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, target: &str) {
        tracing::debug!(target = %target, "navigate");
        self.history.lock().push(target.to_string());
    }
}

/// 是否为外部 URL（而非应用内路径）
pub fn is_external(target: &str) -> bool {
    target.starts_with("http://") || target.starts_with("https://")
}
