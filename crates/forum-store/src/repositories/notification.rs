//! In-memory implementation of NotificationRepository

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::instrument;

use forum_core::entities::{Notification, NotificationFeed, DEFAULT_FEED_CAPACITY};
use forum_core::traits::{NotificationRepository, RepoResult};
use forum_core::value_objects::Snowflake;

/// In-memory implementation of NotificationRepository
///
/// One bounded feed per recipient, created on first push.
#[derive(Clone)]
pub struct MemNotificationRepository {
    feeds: Arc<DashMap<Snowflake, NotificationFeed>>,
    capacity: usize,
}

impl MemNotificationRepository {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_FEED_CAPACITY)
    }

    /// # Panics
    /// Panics if `capacity` is zero
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "feed capacity must be positive");
        Self {
            feeds: Arc::new(DashMap::new()),
            capacity,
        }
    }
}

impl Default for MemNotificationRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationRepository for MemNotificationRepository {
    #[instrument(skip(self, notification), fields(recipient_id = %notification.recipient_id))]
    async fn push(&self, notification: Notification) -> RepoResult<Option<Notification>> {
        let mut feed = self
            .feeds
            .entry(notification.recipient_id)
            .or_insert_with(|| NotificationFeed::with_capacity(self.capacity));
        Ok(feed.push(notification))
    }

    async fn feed(&self, recipient_id: Snowflake) -> RepoResult<NotificationFeed> {
        Ok(self
            .feeds
            .get(&recipient_id)
            .map(|r| r.clone())
            .unwrap_or_else(|| NotificationFeed::with_capacity(self.capacity)))
    }

    #[instrument(skip(self))]
    async fn mark_as_read(&self, recipient_id: Snowflake, id: Snowflake) -> RepoResult<Option<bool>> {
        Ok(self
            .feeds
            .get_mut(&recipient_id)
            .and_then(|mut feed| feed.mark_as_read(id)))
    }

    #[instrument(skip(self))]
    async fn mark_all_as_read(&self, recipient_id: Snowflake) -> RepoResult<usize> {
        Ok(self
            .feeds
            .get_mut(&recipient_id)
            .map_or(0, |mut feed| feed.mark_all_as_read()))
    }
}
