pub mod commands;
pub mod events;
pub mod types;

pub use commands::ApiCommand;
pub use events::{ApiEvent, ReplyOutcome};
pub use types::{ChatMessage, SelectedFile, Sender, UploadSource};
