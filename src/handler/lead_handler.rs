use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use bson::oid::ObjectId;
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;

use crate::dto::lead_dto::{LeadListQuery, LeadListResponse};
use crate::service::lead_service::{LeadService, LeadServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind};

/// Acknowledgement body JustDial expects, byte for byte.
const WEBHOOK_ACK: &str = "RECEIVED";

// Handler: JustDial Webhook (public, GET with query parameters)
//
// The response contract is fixed by the third party: a plain-text RECEIVED
// on success, a JSON {"error": ...} on failure. The shared error envelope
// does not apply here.
pub async fn justdial_webhook_handler(
    State(service): State<Arc<LeadServiceImpl>>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    match service.intake(params).await {
        Ok(_) => (StatusCode::OK, WEBHOOK_ACK).into_response(),
        // Every failure answers 400, insert errors included; that is what
        // the caller's retry logic keys on.
        Err(e) => {
            let msg = match e {
                crate::util::error::ServiceError::InvalidInput(msg) => msg,
                other => other.to_string(),
            };
            (StatusCode::BAD_REQUEST, Json(json!({ "error": msg }))).into_response()
        }
    }
}

// Handler: JustDial Webhook preflight
pub async fn justdial_webhook_options_handler() -> StatusCode {
    StatusCode::OK
}

// Handler: List Leads (admin only)
pub async fn list_leads_handler(
    State(service): State<Arc<LeadServiceImpl>>,
    Query(query): Query<LeadListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(20).clamp(1, 100);
    let (leads, total_count) = service.list(page, limit).await.map_err(HandlerError::from)?;
    Ok(Json(LeadListResponse {
        leads,
        total_count,
        page,
        limit,
    }))
}

// Handler: Mark Lead Processed (admin only)
pub async fn mark_lead_processed_handler(
    State(service): State<Arc<LeadServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError {
        error: HandlerErrorKind::BadRequest,
        message: "Invalid lead id".to_string(),
        details: None,
    })?;
    let updated = service.mark_processed(id).await.map_err(HandlerError::from)?;
    Ok(Json(updated))
}
