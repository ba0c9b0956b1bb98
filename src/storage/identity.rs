use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Nguồn cung cấp `uid` của người dùng cho các request.
pub trait IdentityProvider: Send + Sync {
    fn uid(&self) -> Option<String>;
}

/// Fixed identity, used for `--uid` and tests.
#[derive(Debug, Clone, Default)]
pub struct StaticIdentity(pub Option<String>);

impl IdentityProvider for StaticIdentity {
    fn uid(&self) -> Option<String> {
        self.0.clone()
    }
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct IdentityFile {
    #[serde(default)]
    uid: Option<String>,
}

/// Reads the `"uid"` key of a small JSON file on every lookup, so edits made
/// while the app runs are picked up by the next request.
#[derive(Debug, Clone)]
pub struct FileIdentity {
    path: PathBuf,
}

impl FileIdentity {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self, uid: &str) -> std::io::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let file = IdentityFile {
            uid: Some(uid.to_string()),
        };
        let json = serde_json::to_string_pretty(&file)?;
        fs::write(&self.path, json)
    }
}

impl IdentityProvider for FileIdentity {
    fn uid(&self) -> Option<String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return None,
            Err(err) => {
                log::warn!("Failed to read identity file {}: {err}", self.path.display());
                return None;
            }
        };

        match serde_json::from_str::<IdentityFile>(&content) {
            Ok(file) => file.uid.filter(|uid| !uid.trim().is_empty()),
            Err(err) => {
                log::warn!("Failed to parse identity file {}: {err}", self.path.display());
                None
            }
        }
    }
}
