//! Question entity

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Snowflake, TagSet};

/// A question posted to the forum
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub id: Snowflake,
    pub title: String,
    pub body: String,
    pub tags: TagSet,
    pub author_id: Snowflake,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub views: u32,
    pub votes: i32,
    pub answer_count: u32,
    pub accepted_answer_id: Option<Snowflake>,
}

impl Question {
    pub fn new(
        id: Snowflake,
        author_id: Snowflake,
        title: String,
        body: String,
        tags: TagSet,
    ) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            body,
            tags,
            author_id,
            created_at: now,
            updated_at: now,
            views: 0,
            votes: 0,
            answer_count: 0,
            accepted_answer_id: None,
        }
    }

    /// Case-insensitive substring match on title or body; empty needle matches
    pub fn matches_text(&self, needle: &str) -> bool {
        if needle.is_empty() {
            return true;
        }
        let needle = needle.to_lowercase();
        self.title.to_lowercase().contains(&needle) || self.body.to_lowercase().contains(&needle)
    }

    /// True when at least one of `tags` is on this question; empty matches
    pub fn matches_tags(&self, tags: &TagSet) -> bool {
        tags.is_empty() || self.tags.intersects(tags)
    }

    #[inline]
    pub fn is_answered(&self) -> bool {
        self.answer_count > 0
    }

    #[inline]
    pub fn has_accepted_answer(&self) -> bool {
        self.accepted_answer_id.is_some()
    }

    pub fn record_answer(&mut self) {
        self.answer_count += 1;
        self.updated_at = Utc::now();
    }

    pub fn apply_vote_delta(&mut self, delta: i32) {
        self.votes += delta;
    }
}
