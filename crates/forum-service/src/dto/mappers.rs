//! Entity to DTO mappers
//!
//! Implements `From` conversions from domain entities to response DTOs.

use forum_core::entities::{Answer, Notification, Question, User};
use forum_core::value_objects::VoteState;

use crate::services::VoteOutcome;

use super::responses::{
    AnswerResponse, AuthorResponse, NotificationResponse, QuestionResponse, SessionResponse,
    UserResponse, VoteResponse,
};

// ============================================================================
// User Mappers
// ============================================================================

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            avatar_url: user.avatar_url(),
            reputation: user.reputation,
            joined_at: user.joined_at,
        }
    }
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self::from(&user)
    }
}

impl From<&User> for AuthorResponse {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            avatar_url: user.avatar_url(),
            reputation: user.reputation,
        }
    }
}

impl From<Option<User>> for SessionResponse {
    fn from(user: Option<User>) -> Self {
        Self {
            signed_in: user.is_some(),
            user: user.map(UserResponse::from),
        }
    }
}

// ============================================================================
// Question / Answer Mappers
// ============================================================================

/// Helper struct for creating QuestionResponse with related data
pub struct QuestionWithDetails {
    pub question: Question,
    pub author: Option<User>,
    pub viewer_vote: VoteState,
}

impl From<QuestionWithDetails> for QuestionResponse {
    fn from(details: QuestionWithDetails) -> Self {
        let q = details.question;
        Self {
            id: q.id,
            title: q.title,
            body: q.body,
            tags: q.tags.iter().map(ToString::to_string).collect(),
            author: details.author.as_ref().map(AuthorResponse::from),
            created_at: q.created_at,
            updated_at: q.updated_at,
            views: q.views,
            votes: q.votes,
            answer_count: q.answer_count,
            accepted_answer_id: q.accepted_answer_id,
            viewer_vote: details.viewer_vote,
        }
    }
}

/// Helper struct for creating AnswerResponse with related data
pub struct AnswerWithDetails {
    pub answer: Answer,
    pub author: Option<User>,
    pub viewer_vote: VoteState,
}

impl From<AnswerWithDetails> for AnswerResponse {
    fn from(details: AnswerWithDetails) -> Self {
        let a = details.answer;
        Self {
            id: a.id,
            question_id: a.question_id,
            body: a.body,
            author: details.author.as_ref().map(AuthorResponse::from),
            created_at: a.created_at,
            votes: a.votes,
            accepted: a.accepted,
            viewer_vote: details.viewer_vote,
        }
    }
}

// ============================================================================
// Vote / Notification Mappers
// ============================================================================

impl From<VoteOutcome> for VoteResponse {
    fn from(outcome: VoteOutcome) -> Self {
        Self {
            target: outcome.target,
            state: outcome.tally.state,
            count: outcome.tally.count,
            delta: outcome.transition.delta,
        }
    }
}

impl From<&Notification> for NotificationResponse {
    fn from(n: &Notification) -> Self {
        Self {
            id: n.id,
            kind: n.kind,
            message: n.message.clone(),
            related_id: n.related_id,
            read: n.read,
            created_at: n.created_at,
        }
    }
}

impl From<Notification> for NotificationResponse {
    fn from(n: Notification) -> Self {
        Self::from(&n)
    }
}
