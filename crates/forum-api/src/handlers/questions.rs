//! Question handlers
//!
//! Endpoints for the listing, question pages and question submission.

use axum::{
    extract::{Path, State},
    Json,
};
use forum_service::dto::{
    CreateQuestionRequest, PageResponse, QuestionDetailResponse, QuestionResponse,
};
use forum_service::QuestionService;

use crate::extractors::{JsonBody, Listing, QuestionIdPath};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Filtered, sorted, paginated question listing
///
/// GET /questions?q=&tags=a,b&sort=newest|votes|answers&page=1
pub async fn list_questions(
    State(state): State<AppState>,
    Listing(query): Listing,
) -> ApiResult<Json<PageResponse<QuestionResponse>>> {
    let service = QuestionService::new(state.service_context());
    let page = service.list_questions(&query).await?;
    Ok(Json(page))
}

/// Ask a question
///
/// POST /questions
pub async fn create_question(
    State(state): State<AppState>,
    JsonBody(request): JsonBody<CreateQuestionRequest>,
) -> ApiResult<Created<Json<QuestionResponse>>> {
    let service = QuestionService::new(state.service_context());
    let question = service.submit_question(request).await?;
    Ok(Created(Json(question)))
}

/// Question with its answers
///
/// GET /questions/:question_id
pub async fn get_question(
    State(state): State<AppState>,
    Path(path): Path<QuestionIdPath>,
) -> ApiResult<Json<QuestionDetailResponse>> {
    let question_id = path.question_id()?;
    let service = QuestionService::new(state.service_context());
    let detail = service.get_question(question_id).await?;
    Ok(Json(detail))
}
