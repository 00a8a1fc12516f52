//! Answer handlers

use axum::{
    extract::{Path, State},
    Json,
};
use forum_service::dto::{AnswerResponse, CreateAnswerRequest};
use forum_service::AnswerService;

use crate::extractors::{AnswerIdPath, QuestionIdPath, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Answer a question
///
/// POST /questions/:question_id/answers
pub async fn create_answer(
    State(state): State<AppState>,
    Path(path): Path<QuestionIdPath>,
    ValidatedJson(request): ValidatedJson<CreateAnswerRequest>,
) -> ApiResult<Created<Json<AnswerResponse>>> {
    let question_id = path.question_id()?;
    let service = AnswerService::new(state.service_context());
    let answer = service.submit_answer(question_id, request).await?;
    Ok(Created(Json(answer)))
}

/// Accept an answer to one of the viewer's questions
///
/// POST /answers/:answer_id/accept
pub async fn accept_answer(
    State(state): State<AppState>,
    Path(path): Path<AnswerIdPath>,
) -> ApiResult<Json<AnswerResponse>> {
    let answer_id = path.answer_id()?;
    let service = AnswerService::new(state.service_context());
    let answer = service.accept_answer(answer_id).await?;
    Ok(Json(answer))
}
