//! Route definitions
//!
//! All API routes organized by domain and mounted under /api/v1.

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::{answers, auth, health, notifications, questions, tags, votes};
use crate::state::AppState;

/// Create the main API router with all routes
pub fn create_router() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .nest("/api/v1", api_v1_routes())
}

/// Health check routes, reachable at the root and under /api/v1
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/health", get(health::health_check))
}

/// API v1 routes
fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(health_routes())
        .merge(auth_routes())
        .merge(question_routes())
        .merge(answer_routes())
        .merge(tag_routes())
        .merge(notification_routes())
}

/// Session routes
fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout))
        .route("/auth/me", get(auth::me))
}

/// Question routes
fn question_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/questions",
            get(questions::list_questions).post(questions::create_question),
        )
        .route("/questions/:question_id", get(questions::get_question))
        .route("/questions/:question_id/answers", post(answers::create_answer))
        .route("/questions/:question_id/vote", post(votes::vote_question))
}

/// Answer routes
fn answer_routes() -> Router<AppState> {
    Router::new()
        .route("/answers/:answer_id/accept", post(answers::accept_answer))
        .route("/answers/:answer_id/vote", post(votes::vote_answer))
}

/// Tag routes
fn tag_routes() -> Router<AppState> {
    Router::new().route("/tags", get(tags::list_tags))
}

/// Notification routes
fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/notifications", get(notifications::list_notifications))
        .route("/notifications/read-all", post(notifications::mark_all_read))
        .route(
            "/notifications/:notification_id/read",
            post(notifications::mark_read),
        )
}
