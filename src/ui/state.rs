use crate::config::AppConfig;
use crate::session::{ChatSession, UploadHandler};

/// Trạng thái cục bộ của UI.
pub struct AppState {
    pub chat: ChatSession,
    pub upload: UploadHandler,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        Self {
            chat: ChatSession::new(config.fallback_reply.clone(), config.transport_error_bubble),
            upload: UploadHandler::new(),
            config,
        }
    }
}
