//! Domain events - events emitted when forum state changes
//!
//! Services raise these after a write succeeds; the notification service
//! turns some of them into notifications for the affected members.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{Snowflake, VoteState, VoteTarget};

/// All possible domain events
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DomainEvent {
    // =========================================================================
    // Question Events
    // =========================================================================
    QuestionCreated(QuestionCreatedEvent),

    // =========================================================================
    // Answer Events
    // =========================================================================
    AnswerPosted(AnswerPostedEvent),
    AnswerAccepted(AnswerAcceptedEvent),

    // =========================================================================
    // Vote Events
    // =========================================================================
    VoteCast(VoteCastEvent),

    // =========================================================================
    // Notification Events
    // =========================================================================
    NotificationCreated(NotificationCreatedEvent),
}

impl DomainEvent {
    /// Get the event type name
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::QuestionCreated(_) => "QUESTION_CREATED",
            Self::AnswerPosted(_) => "ANSWER_POSTED",
            Self::AnswerAccepted(_) => "ANSWER_ACCEPTED",
            Self::VoteCast(_) => "VOTE_CAST",
            Self::NotificationCreated(_) => "NOTIFICATION_CREATED",
        }
    }

    /// Get the timestamp of the event
    pub fn timestamp(&self) -> DateTime<Utc> {
        match self {
            Self::QuestionCreated(e) => e.timestamp,
            Self::AnswerPosted(e) => e.timestamp,
            Self::AnswerAccepted(e) => e.timestamp,
            Self::VoteCast(e) => e.timestamp,
            Self::NotificationCreated(e) => e.timestamp,
        }
    }
}

// ============================================================================
// Event Payloads
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionCreatedEvent {
    pub question_id: Snowflake,
    pub author_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerPostedEvent {
    pub answer_id: Snowflake,
    pub question_id: Snowflake,
    pub question_author_id: Snowflake,
    pub author_id: Snowflake,
    pub question_title: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerAcceptedEvent {
    pub answer_id: Snowflake,
    pub question_id: Snowflake,
    pub answer_author_id: Snowflake,
    pub accepted_by: Snowflake,
    pub question_title: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VoteCastEvent {
    pub target: VoteTarget,
    pub voter_id: Snowflake,
    pub state: VoteState,
    pub delta: i32,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotificationCreatedEvent {
    pub notification_id: Snowflake,
    pub recipient_id: Snowflake,
    pub timestamp: DateTime<Utc>,
}

// ============================================================================
// Event Creation Helpers
// ============================================================================

impl QuestionCreatedEvent {
    pub fn new(question_id: Snowflake, author_id: Snowflake) -> Self {
        Self {
            question_id,
            author_id,
            timestamp: Utc::now(),
        }
    }
}

impl AnswerPostedEvent {
    pub fn new(
        answer_id: Snowflake,
        question_id: Snowflake,
        question_author_id: Snowflake,
        author_id: Snowflake,
        question_title: impl Into<String>,
    ) -> Self {
        Self {
            answer_id,
            question_id,
            question_author_id,
            author_id,
            question_title: question_title.into(),
            timestamp: Utc::now(),
        }
    }
}

impl AnswerAcceptedEvent {
    pub fn new(
        answer_id: Snowflake,
        question_id: Snowflake,
        answer_author_id: Snowflake,
        accepted_by: Snowflake,
        question_title: impl Into<String>,
    ) -> Self {
        Self {
            answer_id,
            question_id,
            answer_author_id,
            accepted_by,
            question_title: question_title.into(),
            timestamp: Utc::now(),
        }
    }
}

impl VoteCastEvent {
    pub fn new(target: VoteTarget, voter_id: Snowflake, state: VoteState, delta: i32) -> Self {
        Self {
            target,
            voter_id,
            state,
            delta,
            timestamp: Utc::now(),
        }
    }
}

impl NotificationCreatedEvent {
    pub fn new(notification_id: Snowflake, recipient_id: Snowflake) -> Self {
        Self {
            notification_id,
            recipient_id,
            timestamp: Utc::now(),
        }
    }
}
