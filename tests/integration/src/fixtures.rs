//! Test fixtures and data generators
//!
//! Request bodies the tests send and the response shapes they read back.

use serde::{Deserialize, Serialize};

/// Registration request
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            email: format!("{name}@example.com"),
            password: "secret123".to_string(),
        }
    }
}

/// Login request
#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            email: reg.email.clone(),
            password: reg.password.clone(),
        }
    }
}

/// Question submission
#[derive(Debug, Serialize)]
pub struct CreateQuestionRequest {
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
}

impl CreateQuestionRequest {
    pub fn new(title: &str, body: &str, tags: &[&str]) -> Self {
        Self {
            title: title.to_string(),
            body: body.to_string(),
            tags: tags.iter().map(ToString::to_string).collect(),
        }
    }
}

/// Answer submission
#[derive(Debug, Serialize)]
pub struct CreateAnswerRequest {
    pub body: String,
}

impl CreateAnswerRequest {
    pub fn new(body: &str) -> Self {
        Self {
            body: body.to_string(),
        }
    }
}

/// Vote input
#[derive(Debug, Serialize)]
pub struct VoteRequest {
    pub direction: &'static str,
}

impl VoteRequest {
    pub fn up() -> Self {
        Self { direction: "up" }
    }

    pub fn down() -> Self {
        Self { direction: "down" }
    }
}

/// Member as returned by the API
#[derive(Debug, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub reputation: i64,
}

/// Session state
#[derive(Debug, Deserialize)]
pub struct SessionResponse {
    pub signed_in: bool,
    pub user: Option<UserResponse>,
}

/// Question author
#[derive(Debug, Deserialize)]
pub struct AuthorResponse {
    pub id: String,
    pub name: String,
}

/// Question summary
#[derive(Debug, Deserialize)]
pub struct QuestionResponse {
    pub id: String,
    pub title: String,
    pub body: String,
    pub tags: Vec<String>,
    pub author: Option<AuthorResponse>,
    pub votes: i32,
    pub answer_count: u32,
    pub accepted_answer_id: Option<String>,
    pub viewer_vote: String,
}

/// Answer
#[derive(Debug, Deserialize)]
pub struct AnswerResponse {
    pub id: String,
    pub question_id: String,
    pub body: String,
    pub votes: i32,
    pub accepted: bool,
}

/// Question page
#[derive(Debug, Deserialize)]
pub struct QuestionDetailResponse {
    pub question: QuestionResponse,
    pub answers: Vec<AnswerResponse>,
}

/// Pagination metadata
#[derive(Debug, Deserialize)]
pub struct PageMeta {
    pub page: usize,
    pub page_size: usize,
    pub total_items: usize,
    pub total_pages: usize,
    pub has_next: bool,
}

/// One page of questions
#[derive(Debug, Deserialize)]
pub struct QuestionPage {
    pub data: Vec<QuestionResponse>,
    pub pagination: PageMeta,
}

/// Vote result
#[derive(Debug, Deserialize)]
pub struct VoteResponse {
    pub state: String,
    pub count: i32,
    pub delta: i32,
}

/// Notification
#[derive(Debug, Deserialize)]
pub struct NotificationResponse {
    pub id: String,
    pub kind: String,
    pub message: String,
    pub related_id: String,
    pub read: bool,
}

/// Notification feed
#[derive(Debug, Deserialize)]
pub struct NotificationList {
    pub data: Vec<NotificationResponse>,
    pub unread_count: usize,
}

/// Mark-read result
#[derive(Debug, Deserialize)]
pub struct MarkReadResponse {
    pub updated: usize,
    pub unread_count: usize,
}

/// Tag usage
#[derive(Debug, Deserialize)]
pub struct TagCount {
    pub tag: String,
    pub count: usize,
}

/// `{ "data": ... }` wrapper
#[derive(Debug, Deserialize)]
pub struct DataResponse<T> {
    pub data: T,
}
