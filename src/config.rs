use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

pub const DEFAULT_CONFIG_PATH: &str = "config/docchat.json";

const DEFAULT_API_URL: &str = "http://localhost:8000/api";
const DEFAULT_WEBSOCKET_URL: &str = "ws://localhost:3000/ws";
const DEFAULT_IDENTITY_PATH: &str = "data/identity.json";
const DEFAULT_FALLBACK_REPLY: &str = "Đã có lỗi xảy ra, vui lòng thử lại sau.";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api_url: String,
    /// Chưa dùng; chỉ hiển thị trong panel cấu hình.
    pub websocket_url: String,
    /// JSON file holding `{"uid": "..."}`.
    pub identity_path: String,
    /// Shown in place of a reply when the server rejects a question.
    pub fallback_reply: String,
    /// Also show `fallback_reply` when the request never reached the server.
    pub transport_error_bubble: bool,
    pub model: ModelDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            websocket_url: DEFAULT_WEBSOCKET_URL.to_string(),
            identity_path: DEFAULT_IDENTITY_PATH.to_string(),
            fallback_reply: DEFAULT_FALLBACK_REPLY.to_string(),
            transport_error_bubble: false,
            model: ModelDefaults::default(),
        }
    }
}

/// Tham số model/RAG mặc định. Backend tự quyết định; client chỉ hiển thị.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelDefaults {
    pub default_model: String,
    pub default_embedding_model: String,
    pub default_vector_store: String,
    pub default_chunk_size: u32,
    pub default_chunk_overlap: u32,
    pub default_max_tokens: u32,
    pub default_temperature: f32,
    pub default_top_p: f32,
}

impl Default for ModelDefaults {
    fn default() -> Self {
        Self {
            default_model: "gpt-3.5-turbo".to_string(),
            default_embedding_model: "text-embedding-3-small".to_string(),
            default_vector_store: "local".to_string(),
            default_chunk_size: 1000,
            default_chunk_overlap: 200,
            default_max_tokens: 1000,
            default_temperature: 0.7,
            default_top_p: 1.0,
        }
    }
}

/// Missing file: write the defaults out so they can be edited, then use them.
/// Unreadable or malformed file: log and use the defaults.
pub fn load_config(path: &str) -> AppConfig {
    let path = Path::new(path);
    match fs::read_to_string(path) {
        Ok(content) => match serde_json::from_str::<AppConfig>(&content) {
            Ok(config) => config,
            Err(err) => {
                log::warn!("Failed to parse config file {}: {err}", path.display());
                AppConfig::default()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            log::info!(
                "Config file {} not found; writing defaults",
                path.display()
            );
            let config = AppConfig::default();
            if let Err(err) = save_config(path, &config) {
                log::warn!("Unable to create {}: {err}", path.display());
            }
            config
        }
        Err(err) => {
            log::warn!("Failed to read config file {}: {err}", path.display());
            AppConfig::default()
        }
    }
}

pub fn save_config(path: &Path, config: &AppConfig) -> std::io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(config)?;
    fs::write(path, json)
}
