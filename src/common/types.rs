use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Ai là người viết tin nhắn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

impl fmt::Display for Sender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sender::User => f.write_str("You"),
            Sender::Bot => f.write_str("Bot"),
        }
    }
}

/// Domain model đại diện một tin nhắn chat.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub sender: Sender,
    pub text: String,
    pub timestamp: i64,
}

impl ChatMessage {
    pub fn new(sender: Sender, text: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            sender,
            text: text.into(),
            timestamp: Utc::now().timestamp_millis(),
        }
    }
}

/// File bytes ready to go out as the `file` part of an upload.
#[derive(Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub bytes: Vec<u8>,
    pub mime: Option<String>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            bytes,
            mime: None,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

// Không in toàn bộ bytes ra log.
impl fmt::Debug for SelectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SelectedFile")
            .field("name", &self.name)
            .field("size", &self.bytes.len())
            .field("mime", &self.mime)
            .finish()
    }
}

/// Where an upload's bytes come from. Paths are read by the API worker, never
/// on the UI thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UploadSource {
    Path(PathBuf),
    /// Web drops carry their bytes inline.
    Inline(SelectedFile),
}

impl UploadSource {
    /// Desktop drops carry a path; `None` when the drop has neither.
    pub fn from_dropped(file: &egui::DroppedFile) -> Option<Self> {
        let mime = (!file.mime.is_empty()).then(|| file.mime.clone());
        match (&file.bytes, &file.path) {
            (Some(bytes), _) => Some(UploadSource::Inline(SelectedFile {
                name: file.name.clone(),
                bytes: bytes.to_vec(),
                mime,
            })),
            (None, Some(path)) => Some(UploadSource::Path(path.clone())),
            (None, None) => None,
        }
    }

    pub fn name(&self) -> String {
        match self {
            UploadSource::Path(path) => file_name_of(path),
            UploadSource::Inline(file) => file.name.clone(),
        }
    }

    pub async fn load(self) -> std::io::Result<SelectedFile> {
        match self {
            UploadSource::Path(path) => {
                let bytes = tokio::fs::read(&path).await?;
                Ok(SelectedFile::new(file_name_of(&path), bytes))
            }
            UploadSource::Inline(file) => Ok(file),
        }
    }
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_get_distinct_ids() {
        let first = ChatMessage::new(Sender::User, "a");
        let second = ChatMessage::new(Sender::User, "a");
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn path_source_is_read_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.pdf");
        std::fs::write(&path, b"%PDF-1.4").unwrap();

        let source = UploadSource::Path(path);
        assert_eq!(source.name(), "report.pdf");

        let selected = source.load().await.unwrap();
        assert_eq!(selected.name, "report.pdf");
        assert_eq!(selected.bytes, b"%PDF-1.4");
        assert_eq!(selected.mime, None);
    }

    #[tokio::test]
    async fn missing_path_fails_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let source = UploadSource::Path(dir.path().join("gone.pdf"));
        assert!(source.load().await.is_err());
    }

    #[test]
    fn dropped_bytes_win_over_path() {
        let dropped = egui::DroppedFile {
            name: "notes.txt".to_string(),
            mime: "text/plain".to_string(),
            path: Some(PathBuf::from("/tmp/notes.txt")),
            bytes: Some(b"hello".to_vec().into()),
            ..Default::default()
        };

        let Some(UploadSource::Inline(selected)) = UploadSource::from_dropped(&dropped) else {
            panic!("expected inline bytes");
        };
        assert_eq!(selected.name, "notes.txt");
        assert_eq!(selected.bytes, b"hello");
        assert_eq!(selected.mime.as_deref(), Some("text/plain"));
    }

    #[test]
    fn dropped_path_is_not_read() {
        let dropped = egui::DroppedFile {
            name: "big.pdf".to_string(),
            path: Some(PathBuf::from("/does/not/exist/big.pdf")),
            ..Default::default()
        };

        assert_eq!(
            UploadSource::from_dropped(&dropped),
            Some(UploadSource::Path(PathBuf::from("/does/not/exist/big.pdf")))
        );
    }

    #[test]
    fn dropped_file_without_content_is_skipped() {
        let dropped = egui::DroppedFile {
            name: "ghost".to_string(),
            ..Default::default()
        };
        assert_eq!(UploadSource::from_dropped(&dropped), None);
    }
}
