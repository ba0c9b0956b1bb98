pub mod chat;
pub mod upload;

pub use chat::ChatSession;
pub use upload::UploadHandler;
