//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Snowflake IDs serialize as strings.

use chrono::{DateTime, Utc};
use serde::Serialize;

use forum_core::entities::{NotificationKind, UserRole};
use forum_core::pipeline::Page;
use forum_core::value_objects::{Snowflake, VoteState, VoteTarget};

// ============================================================================
// Common Response Types
// ============================================================================

/// Generic API response wrapper
#[derive(Debug, Serialize)]
pub struct ApiResponse<T> {
    pub data: T,
}

impl<T> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// One page of a listing
#[derive(Debug, Serialize)]
pub struct PageResponse<T> {
    pub data: Vec<T>,
    pub pagination: PageMeta,
}

/// Page-number pagination metadata
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PageMeta {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
}

impl<T> From<Page<T>> for PageResponse<T> {
    fn from(page: Page<T>) -> Self {
        Self {
            pagination: PageMeta {
                page: page.page,
                page_size: page.page_size,
                total_items: page.total_items,
                total_pages: page.total_pages,
                has_next: page.has_next,
            },
            data: page.items,
        }
    }
}

// ============================================================================
// User Responses
// ============================================================================

/// The signed-in member, including private fields
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: Snowflake,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub avatar_url: String,
    pub reputation: i32,
    pub joined_at: DateTime<Utc>,
}

/// Public view of a post author
#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    pub id: Snowflake,
    pub name: String,
    pub avatar_url: String,
    pub reputation: i32,
}

/// Session state after login, logout or `me`
#[derive(Debug, Clone, Serialize)]
pub struct SessionResponse {
    pub signed_in: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user: Option<UserResponse>,
}

// ============================================================================
// Question / Answer Responses
// ============================================================================

/// Question as shown in listings and on its own page
#[derive(Debug, Clone, Serialize)]
pub struct QuestionResponse {
    pub id: Snowflake,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    /// `None` when the author record is gone
    pub author: Option<AuthorResponse>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub views: u32,
    pub votes: i32,
    pub answer_count: u32,
    pub accepted_answer_id: Option<Snowflake>,
    /// The viewer's standing vote; `none` when signed out
    pub viewer_vote: VoteState,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnswerResponse {
    pub id: Snowflake,
    pub question_id: Snowflake,
    pub body: String,
    pub author: Option<AuthorResponse>,
    pub created_at: DateTime<Utc>,
    pub votes: i32,
    pub accepted: bool,
    pub viewer_vote: VoteState,
}

/// Question page: the question and its ordered answers
#[derive(Debug, Clone, Serialize)]
pub struct QuestionDetailResponse {
    pub question: QuestionResponse,
    pub answers: Vec<AnswerResponse>,
}

// ============================================================================
// Vote Responses
// ============================================================================

#[derive(Debug, Clone, Copy, Serialize)]
pub struct VoteResponse {
    pub target: VoteTarget,
    pub state: VoteState,
    pub count: i32,
    pub delta: i32,
}

// ============================================================================
// Notification Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct NotificationResponse {
    pub id: Snowflake,
    pub kind: NotificationKind,
    pub message: String,
    pub related_id: Snowflake,
    pub read: bool,
    pub created_at: DateTime<Utc>,
}

/// The viewer's feed, newest first
#[derive(Debug, Clone, Serialize)]
pub struct NotificationListResponse {
    pub data: Vec<NotificationResponse>,
    pub unread_count: usize,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct MarkReadResponse {
    /// Entries flipped from unread to read
    pub updated: usize,
    pub unread_count: usize,
}

// ============================================================================
// Tag Responses
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TagCountResponse {
    pub tag: String,
    pub count: usize,
}

// ============================================================================
// Health Check Responses
// ============================================================================

/// Health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            timestamp: Utc::now(),
        }
    }
}
