use axum::{extract::{Query, State}, response::IntoResponse, Json};
use std::sync::Arc;

use crate::dto::activity_dto::{ActivityLogListResponse, ActivityLogQuery};
use crate::service::activity_logger::ActivityLogger;
use crate::util::error::HandlerError;

// Handler: List Activity Logs (admin only)
pub async fn list_activity_logs_handler(
    State(logger): State<Arc<ActivityLogger>>,
    Query(query): Query<ActivityLogQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(50).clamp(1, 200);
    let (logs, total_count) = logger
        .list(query.activity_type, query.entity_type, page, limit)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(ActivityLogListResponse {
        logs,
        total_count,
        page,
        limit,
    }))
}
