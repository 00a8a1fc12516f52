//! Session handlers
//!
//! Endpoints for registration, login, logout and the current viewer.

use axum::{extract::State, Json};
use forum_common::AppError;
use forum_service::dto::{LoginRequest, RegisterRequest, SessionResponse, UserResponse};
use forum_service::SessionService;

use crate::extractors::{JsonBody, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Register a new member and sign them in
///
/// POST /auth/register
pub async fn register(
    State(state): State<AppState>,
    ValidatedJson(request): ValidatedJson<RegisterRequest>,
) -> ApiResult<Created<Json<UserResponse>>> {
    let service = SessionService::new(state.service_context());
    let user = service.register(request).await?;
    Ok(Created(Json(UserResponse::from(user))))
}

/// Sign in with email and password
///
/// POST /auth/login
pub async fn login(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let service = SessionService::new(state.service_context());
    if !service.login(request).await? {
        return Err(AppError::InvalidCredentials.into());
    }
    Ok(Json(SessionResponse::from(service.current_viewer())))
}

/// Sign out
///
/// POST /auth/logout
pub async fn logout(State(state): State<AppState>) -> ApiResult<NoContent> {
    SessionService::new(state.service_context()).logout().await?;
    Ok(NoContent)
}

/// The signed-in viewer, if any
///
/// GET /auth/me
pub async fn me(State(state): State<AppState>) -> Json<SessionResponse> {
    let service = SessionService::new(state.service_context());
    Json(SessionResponse::from(service.current_viewer()))
}
