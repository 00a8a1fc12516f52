//! Notification handlers
//!
//! All endpoints act on the signed-in viewer's feed.

use axum::{
    extract::{Path, State},
    Json,
};
use forum_service::dto::{MarkReadResponse, NotificationListResponse};
use forum_service::NotificationService;

use crate::extractors::NotificationIdPath;
use crate::response::ApiResult;
use crate::state::AppState;

/// The viewer's feed, newest first
///
/// GET /notifications
pub async fn list_notifications(
    State(state): State<AppState>,
) -> ApiResult<Json<NotificationListResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.list().await?))
}

/// Mark one notification read
///
/// POST /notifications/:notification_id/read
pub async fn mark_read(
    State(state): State<AppState>,
    Path(path): Path<NotificationIdPath>,
) -> ApiResult<Json<MarkReadResponse>> {
    let notification_id = path.notification_id()?;
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.mark_as_read(notification_id).await?))
}

/// Mark the whole feed read
///
/// POST /notifications/read-all
pub async fn mark_all_read(State(state): State<AppState>) -> ApiResult<Json<MarkReadResponse>> {
    let service = NotificationService::new(state.service_context());
    Ok(Json(service.mark_all_as_read().await?))
}
