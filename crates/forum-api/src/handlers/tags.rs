//! Tag handlers

use axum::{
    extract::{Query, State},
    Json,
};
use forum_service::dto::{ApiResponse, TagCountResponse, TagsParams};
use forum_service::TagService;

use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Most used tags
///
/// GET /tags?limit=
pub async fn list_tags(
    State(state): State<AppState>,
    params: Result<Query<TagsParams>, axum::extract::rejection::QueryRejection>,
) -> ApiResult<Json<ApiResponse<Vec<TagCountResponse>>>> {
    let Query(params) = params.map_err(|e| ApiError::invalid_query(e.body_text()))?;
    let service = TagService::new(state.service_context());
    let tags = service.popular_tags(params.limit).await?;
    Ok(Json(ApiResponse::new(tags)))
}
