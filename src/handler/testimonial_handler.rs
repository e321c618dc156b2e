use axum::{extract::{State, Path, Query}, response::IntoResponse, Json};
use bson::oid::ObjectId;
use std::sync::Arc;

use crate::dto::testimonial_dto::{
    ActiveTestimonialsResponse, ArchivedTestimonialsResponse, SetTestimonialStatusRequest,
    SubmitTestimonialRequest, TestimonialListQuery,
};
use crate::service::testimonial_service::{
    NewTestimonial, TestimonialListing, TestimonialService, TestimonialServiceImpl,
};
use crate::util::error::{HandlerError, HandlerErrorKind};

use validator::Validate;

// Handler: Submit Testimonial (public form)
pub async fn submit_testimonial_handler(
    State(service): State<Arc<TestimonialServiceImpl>>,
    Json(payload): Json<SubmitTestimonialRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError {
            error: HandlerErrorKind::BadRequest,
            message: format!("Validation error: {}", e),
            details: None,
        });
    }
    let created = service
        .submit(NewTestimonial {
            name: payload.name,
            location: payload.location,
            service: payload.service,
            rating: payload.rating,
            message: payload.message,
        })
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(created))
}

// Handler: List Approved Testimonials (public site)
pub async fn list_approved_testimonials_handler(
    State(service): State<Arc<TestimonialServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let approved = service.list_approved().await.map_err(HandlerError::from)?;
    Ok(Json(approved))
}

// Handler: List Testimonials for Moderation (admin only)
pub async fn list_testimonials_handler(
    State(service): State<Arc<TestimonialServiceImpl>>,
    Query(query): Query<TestimonialListQuery>,
) -> Result<impl IntoResponse, HandlerError> {
    let listing = service
        .list(query.archived.unwrap_or(false))
        .await
        .map_err(HandlerError::from)?;
    match listing {
        TestimonialListing::Active { pending, approved } => {
            Ok(Json(ActiveTestimonialsResponse { pending, approved }).into_response())
        }
        TestimonialListing::Archived { rejected } => {
            Ok(Json(ArchivedTestimonialsResponse { rejected }).into_response())
        }
    }
}

// Handler: Set Testimonial Status (admin only)
pub async fn set_testimonial_status_handler(
    State(service): State<Arc<TestimonialServiceImpl>>,
    Path((id,)): Path<(String,)>,
    Json(payload): Json<SetTestimonialStatusRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError {
        error: HandlerErrorKind::BadRequest,
        message: "Invalid testimonial id".to_string(),
        details: None,
    })?;
    let updated = service
        .set_status(id, payload.status)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(updated))
}

// Handler: Restore Rejected Testimonial (admin only)
pub async fn restore_testimonial_handler(
    State(service): State<Arc<TestimonialServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError {
        error: HandlerErrorKind::BadRequest,
        message: "Invalid testimonial id".to_string(),
        details: None,
    })?;
    let restored = service.restore(id).await.map_err(HandlerError::from)?;
    Ok(Json(restored))
}
