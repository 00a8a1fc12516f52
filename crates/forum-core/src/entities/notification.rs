//! Notification entity and the bounded per-viewer feed

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

use crate::value_objects::Snowflake;

/// Most recent notifications kept per viewer
pub const DEFAULT_FEED_CAPACITY: usize = 10;

/// Why a notification was raised
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    AnswerPosted,
    Mention,
    AnswerAccepted,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AnswerPosted => "answer_posted",
            Self::Mention => "mention",
            Self::AnswerAccepted => "answer_accepted",
        }
    }
}

/// A single notification delivered to a viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub id: Snowflake,
    pub recipient_id: Snowflake,
    pub kind: NotificationKind,
    pub message: String,
    /// Question or answer the notification points at
    pub related_id: Snowflake,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// Notification content before it has an id and a recipient
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewNotification {
    pub kind: NotificationKind,
    pub message: String,
    pub related_id: Snowflake,
}

impl NewNotification {
    pub fn new(kind: NotificationKind, message: impl Into<String>, related_id: Snowflake) -> Self {
        Self {
            kind,
            message: message.into(),
            related_id,
        }
    }

    pub fn into_notification(self, id: Snowflake, recipient_id: Snowflake) -> Notification {
        Notification {
            id,
            recipient_id,
            kind: self.kind,
            message: self.message,
            related_id: self.related_id,
            read: false,
            created_at: Utc::now(),
        }
    }
}

/// Newest-first notification history with a fixed capacity
///
/// `unread_count()` always equals the number of entries with `read == false`,
/// including after the oldest entry is evicted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationFeed {
    items: VecDeque<Notification>,
    unread: usize,
    capacity: usize,
}

impl NotificationFeed {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_FEED_CAPACITY)
    }

    /// # Panics
    /// Panics if `capacity` is zero
    pub fn with_capacity(capacity: usize) -> Self {
        assert!(capacity > 0, "feed capacity must be positive");
        Self {
            items: VecDeque::with_capacity(capacity),
            unread: 0,
            capacity,
        }
    }

    /// Push to the front, returning the evicted oldest entry if over capacity
    pub fn push(&mut self, notification: Notification) -> Option<Notification> {
        if !notification.read {
            self.unread += 1;
        }
        self.items.push_front(notification);

        if self.items.len() > self.capacity {
            let evicted = self.items.pop_back()?;
            if !evicted.read {
                self.unread -= 1;
            }
            Some(evicted)
        } else {
            None
        }
    }

    /// Mark one entry read
    ///
    /// `None` if it is not in the feed, otherwise whether it was unread.
    pub fn mark_as_read(&mut self, id: Snowflake) -> Option<bool> {
        let n = self.items.iter_mut().find(|n| n.id == id)?;
        if n.read {
            return Some(false);
        }
        n.read = true;
        self.unread -= 1;
        Some(true)
    }

    /// Mark everything read, returning how many entries changed
    pub fn mark_all_as_read(&mut self) -> usize {
        let changed = self.unread;
        for n in &mut self.items {
            n.read = true;
        }
        self.unread = 0;
        changed
    }

    #[inline]
    pub fn unread_count(&self) -> usize {
        self.unread
    }

    pub fn iter(&self) -> impl Iterator<Item = &Notification> {
        self.items.iter()
    }

    pub fn get(&self, id: Snowflake) -> Option<&Notification> {
        self.items.iter().find(|n| n.id == id)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn to_vec(&self) -> Vec<Notification> {
        self.items.iter().cloned().collect()
    }
}

impl Default for NotificationFeed {
    fn default() -> Self {
        Self::new()
    }
}
