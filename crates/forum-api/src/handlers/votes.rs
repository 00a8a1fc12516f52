//! Vote handlers
//!
//! The service ignores votes without a viewer; here that becomes a 401.

use axum::{
    extract::{Path, State},
    Json,
};
use forum_core::VoteTarget;
use forum_service::dto::{VoteRequest, VoteResponse};
use forum_service::VoteService;

use crate::extractors::{AnswerIdPath, JsonBody, QuestionIdPath};
use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Vote on a question
///
/// POST /questions/:question_id/vote
pub async fn vote_question(
    State(state): State<AppState>,
    Path(path): Path<QuestionIdPath>,
    JsonBody(request): JsonBody<VoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    let target = VoteTarget::Question(path.question_id()?);
    apply(&state, target, request).await
}

/// Vote on an answer
///
/// POST /answers/:answer_id/vote
pub async fn vote_answer(
    State(state): State<AppState>,
    Path(path): Path<AnswerIdPath>,
    JsonBody(request): JsonBody<VoteRequest>,
) -> ApiResult<Json<VoteResponse>> {
    let target = VoteTarget::Answer(path.answer_id()?);
    apply(&state, target, request).await
}

async fn apply(
    state: &AppState,
    target: VoteTarget,
    request: VoteRequest,
) -> ApiResult<Json<VoteResponse>> {
    let service = VoteService::new(state.service_context());
    let outcome = service
        .apply_vote(target, request.direction)
        .await?
        .ok_or_else(ApiError::unauthenticated)?;
    Ok(Json(VoteResponse::from(outcome)))
}
