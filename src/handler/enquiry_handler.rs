use axum::{extract::{State, Path, Query}, response::IntoResponse, Json, Extension};
use bson::oid::ObjectId;
use std::sync::Arc;

use crate::dto::enquiry_dto::{
    AddEnquiryCommentRequest, EnquiryListQuery, EnquiryListResponse, SubmitEnquiryRequest,
    UpdateEnquiryStatusRequest,
};
use crate::handler::actor_context;
use crate::middlewares::request_meta::RequestMeta;
use crate::service::enquiry_service::{EnquiryService, EnquiryServiceImpl, NewEnquiry};
use crate::util::error::{HandlerError, HandlerErrorKind};
use crate::util::jwt::Claims;

use validator::Validate;

// Handler: Submit Enquiry (public contact form)
pub async fn submit_enquiry_handler(
    State(service): State<Arc<EnquiryServiceImpl>>,
    Json(payload): Json<SubmitEnquiryRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError {
            error: HandlerErrorKind::BadRequest,
            message: format!("Validation error: {}", e),
            details: None,
        });
    }
    let created = service
        .submit(NewEnquiry {
            name: payload.name,
            email: payload.email,
            phone: payload.phone,
            service: payload.service,
            message: payload.message,
        })
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(created))
}

// Handler: List Enquiries (admin only)
pub async fn list_enquiries_handler(
    State(service): State<Arc<EnquiryServiceImpl>>,
    Query(query): Query<EnquiryListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let page = query.page.unwrap_or(1).max(1);
    let listing = service
        .list(query.archived.unwrap_or(false), query.status, page)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(EnquiryListResponse {
        enquiries: listing.rows,
        total_count: listing.total_count,
        has_more: listing.has_more,
        page,
    }))
}

// Handler: Get Enquiry (admin only)
pub async fn get_enquiry_handler(
    State(service): State<Arc<EnquiryServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError {
        error: HandlerErrorKind::BadRequest,
        message: "Invalid enquiry id".to_string(),
        details: None,
    })?;
    let enquiry = service.get(id).await.map_err(HandlerError::from)?;
    Ok(Json(enquiry))
}

// Handler: Update Enquiry Status (admin only)
pub async fn update_enquiry_status_handler(
    State(service): State<Arc<EnquiryServiceImpl>>,
    Extension(claims): Extension<Claims>,
    meta: Option<Extension<RequestMeta>>,
    Path((id,)): Path<(String,)>,
    Json(payload): Json<UpdateEnquiryStatusRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError {
        error: HandlerErrorKind::BadRequest,
        message: "Invalid enquiry id".to_string(),
        details: None,
    })?;
    let actor = actor_context(&claims, meta.as_ref().map(|m| &m.0));
    let updated = service
        .change_status(id, payload.status, &actor)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(updated))
}

// Handler: Archive Enquiry (admin only)
pub async fn archive_enquiry_handler(
    State(service): State<Arc<EnquiryServiceImpl>>,
    Extension(claims): Extension<Claims>,
    meta: Option<Extension<RequestMeta>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError {
        error: HandlerErrorKind::BadRequest,
        message: "Invalid enquiry id".to_string(),
        details: None,
    })?;
    let actor = actor_context(&claims, meta.as_ref().map(|m| &m.0));
    let archived = service.archive(id, &actor).await.map_err(HandlerError::from)?;
    Ok(Json(archived))
}

// Handler: Unarchive Enquiry (admin only)
pub async fn unarchive_enquiry_handler(
    State(service): State<Arc<EnquiryServiceImpl>>,
    Extension(claims): Extension<Claims>,
    meta: Option<Extension<RequestMeta>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError {
        error: HandlerErrorKind::BadRequest,
        message: "Invalid enquiry id".to_string(),
        details: None,
    })?;
    let actor = actor_context(&claims, meta.as_ref().map(|m| &m.0));
    let restored = service.unarchive(id, &actor).await.map_err(HandlerError::from)?;
    Ok(Json(restored))
}

// Handler: Add Enquiry Comment (admin only)
pub async fn add_enquiry_comment_handler(
    State(service): State<Arc<EnquiryServiceImpl>>,
    Path((id,)): Path<(String,)>,
    Json(payload): Json<AddEnquiryCommentRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError {
        error: HandlerErrorKind::BadRequest,
        message: "Invalid enquiry id".to_string(),
        details: None,
    })?;
    if let Err(e) = payload.validate() {
        return Err(HandlerError {
            error: HandlerErrorKind::BadRequest,
            message: format!("Validation error: {}", e),
            details: None,
        });
    }
    let updated = service
        .add_comment(id, payload.comment)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(updated))
}
