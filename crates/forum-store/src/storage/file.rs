//! Key-value storage persisted as a single JSON object on disk

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, instrument, warn};

use forum_core::error::DomainError;
use forum_core::traits::{LocalStorage, RepoResult};

fn storage_error(e: impl std::fmt::Display) -> DomainError {
    DomainError::StorageError(e.to_string())
}

/// Key-value storage backed by a JSON file
///
/// The whole map is cached in memory and rewritten on every change. Writes go
/// to a sibling temp file first and are renamed into place.
#[derive(Clone)]
pub struct FileLocalStorage {
    path: Arc<PathBuf>,
    entries: Arc<Mutex<BTreeMap<String, String>>>,
}

impl FileLocalStorage {
    /// Open the file at `path`, starting empty if it does not exist
    ///
    /// # Errors
    /// Returns `DomainError::StorageError` if the file cannot be read or is not
    /// a JSON object of strings
    pub async fn open(path: impl AsRef<Path>) -> RepoResult<Self> {
        let path = path.as_ref().to_path_buf();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(raw) if raw.trim().is_empty() => BTreeMap::new(),
            Ok(raw) => serde_json::from_str(&raw).map_err(storage_error)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Storage file not found, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(storage_error(e)),
        };

        Ok(Self {
            path: Arc::new(path),
            entries: Arc::new(Mutex::new(entries)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn flush(&self, entries: &BTreeMap<String, String>) -> RepoResult<()> {
        let json = serde_json::to_string_pretty(entries).map_err(storage_error)?;
        let tmp = self.path.with_extension("json.tmp");

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(storage_error)?;
        }
        tokio::fs::write(&tmp, json).await.map_err(storage_error)?;
        tokio::fs::rename(&tmp, self.path.as_path()).await.map_err(|e| {
            warn!(path = %self.path.display(), error = %e, "Failed to replace storage file");
            storage_error(e)
        })
    }
}

#[async_trait]
impl LocalStorage for FileLocalStorage {
    async fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    #[instrument(skip(self, value))]
    async fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        let mut entries = self.entries.lock().await;
        entries.insert(key.to_string(), value.to_string());
        self.flush(&entries).await
    }

    #[instrument(skip(self))]
    async fn remove(&self, key: &str) -> RepoResult<()> {
        let mut entries = self.entries.lock().await;
        if entries.remove(key).is_some() {
            self.flush(&entries).await?;
        }
        Ok(())
    }
}
