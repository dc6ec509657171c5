use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// 后端地址的环境变量名
pub const API_URL_ENV: &str = "REALBOOST_API_URL";

/// 未配置时使用的本地后端地址
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

fn base_dir() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".realboost")
}

/// 后端 API 配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: std::env::var(API_URL_ENV)
                .unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
        }
    }
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiConfig {
            base_url: base_url.into(),
        }
    }

    /// 拼接完整 URL，去掉 base_url 末尾多余的斜杠
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

/// 本地会话存储配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StorageConfig {
    pub path: PathBuf,
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig {
            path: base_dir().join("session.json"),
        }
    }
}

/// 统一配置
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub storage: StorageConfig,
}

impl Config {
    /// 从文件加载配置，环境变量中的后端地址优先
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let content = fs::read_to_string(path)
                .with_context(|| format!("读取配置文件失败：{}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("解析配置文件失败：{}", path.display()))?
        } else {
            Config::default()
        };

        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.api.base_url = url;
        }

        Ok(config)
    }

    /// 保存配置到文件
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// 默认配置文件路径
    pub fn default_path() -> PathBuf {
        base_dir().join("config.toml")
    }

    /// 从默认位置加载配置
    pub fn load_default() -> Result<Self> {
        Self::load(&Self::default_path())
    }

    /// 确保会话存储目录存在
    pub fn ensure_storage(&self) -> Result<()> {
        if let Some(parent) = self.storage.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("创建存储目录失败：{}", parent.display()))?;
        }
        Ok(())
    }
}
