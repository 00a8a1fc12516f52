//! Process-local key-value storage

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use forum_core::traits::{LocalStorage, RepoResult};

/// Key-value storage that lives as long as the process
#[derive(Clone, Default)]
pub struct MemoryLocalStorage {
    entries: Arc<DashMap<String, String>>,
}

impl MemoryLocalStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LocalStorage for MemoryLocalStorage {
    async fn get(&self, key: &str) -> RepoResult<Option<String>> {
        Ok(self.entries.get(key).map(|r| r.clone()))
    }

    async fn set(&self, key: &str, value: &str) -> RepoResult<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> RepoResult<()> {
        self.entries.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_remove() {
        let storage = MemoryLocalStorage::new();
        assert!(storage.get("k").await.unwrap().is_none());

        storage.set("k", "v1").await.unwrap();
        storage.set("k", "v2").await.unwrap();
        assert_eq!(storage.get("k").await.unwrap().as_deref(), Some("v2"));

        storage.remove("k").await.unwrap();
        storage.remove("k").await.unwrap();
        assert!(storage.get("k").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_clones_share_entries() {
        let storage = MemoryLocalStorage::new();
        let other = storage.clone();
        storage.set("k", "v").await.unwrap();
        assert_eq!(other.get("k").await.unwrap().as_deref(), Some("v"));
    }
}
