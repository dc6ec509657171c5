pub mod api;
pub mod cli;
pub mod config;
pub mod error;
pub mod navigation;
pub mod session;
pub mod types;

pub use api::{ApiClient, ApiRequest};
pub use cli::run_cli;
pub use config::{ApiConfig, Config, StorageConfig};
pub use error::ApiError;
pub use navigation::{Navigator, RecordingNavigator};
pub use session::{FileStore, KeyValueStore, MemoryStore, Session};
