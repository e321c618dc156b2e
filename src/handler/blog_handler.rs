use axum::{extract::{State, Path}, response::IntoResponse, Json, Extension};
use bson::oid::ObjectId;
use std::sync::Arc;

use crate::dto::blog_dto::{CreateBlogPostRequest, UpdateBlogPostRequest};
use crate::handler::actor_context;
use crate::middlewares::request_meta::RequestMeta;
use crate::service::blog_service::{BlogPostChanges, BlogService, BlogServiceImpl, NewBlogPost};
use crate::util::error::{HandlerError, HandlerErrorKind};
use crate::util::jwt::Claims;

use validator::Validate;

// Handler: List Published Posts (public site)
pub async fn list_published_posts_handler(
    State(service): State<Arc<BlogServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let posts = service.list_published().await.map_err(HandlerError::from)?;
    Ok(Json(posts))
}

// Handler: Get Published Post by Slug (public site)
pub async fn get_published_post_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Path((slug,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let post = service
        .get_published_by_slug(&slug)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(post))
}

// Handler: List All Posts (admin only)
pub async fn list_all_posts_handler(
    State(service): State<Arc<BlogServiceImpl>>,
) -> Result<impl IntoResponse, HandlerError> {
    let posts = service.list_all().await.map_err(HandlerError::from)?;
    Ok(Json(posts))
}

// Handler: Get Post (admin only)
pub async fn get_post_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError {
        error: HandlerErrorKind::BadRequest,
        message: "Invalid post id".to_string(),
        details: None,
    })?;
    let post = service.get(id).await.map_err(HandlerError::from)?;
    Ok(Json(post))
}

// Handler: Create Post (admin only)
pub async fn create_post_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Extension(claims): Extension<Claims>,
    meta: Option<Extension<RequestMeta>>,
    Json(payload): Json<CreateBlogPostRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError {
            error: HandlerErrorKind::BadRequest,
            message: format!("Validation error: {}", e),
            details: None,
        });
    }
    let actor = actor_context(&claims, meta.as_ref().map(|m| &m.0));
    let created = service
        .create(
            NewBlogPost {
                title: payload.title,
                excerpt: payload.excerpt,
                content: payload.content,
                category: payload.category,
                keywords: payload.keywords,
                publish_date: payload.publish_date,
                read_time: payload.read_time,
                image_url: payload.image_url,
                status: payload.status,
            },
            &actor,
        )
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(created))
}

// Handler: Update Post (admin only)
pub async fn update_post_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Extension(claims): Extension<Claims>,
    meta: Option<Extension<RequestMeta>>,
    Path((id,)): Path<(String,)>,
    Json(payload): Json<UpdateBlogPostRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError {
        error: HandlerErrorKind::BadRequest,
        message: "Invalid post id".to_string(),
        details: None,
    })?;
    if let Err(e) = payload.validate() {
        return Err(HandlerError {
            error: HandlerErrorKind::BadRequest,
            message: format!("Validation error: {}", e),
            details: None,
        });
    }
    let actor = actor_context(&claims, meta.as_ref().map(|m| &m.0));
    let updated = service
        .update(
            id,
            BlogPostChanges {
                title: payload.title,
                excerpt: payload.excerpt,
                content: payload.content,
                category: payload.category,
                keywords: payload.keywords,
                publish_date: payload.publish_date,
                read_time: payload.read_time,
                image_url: payload.image_url,
                status: payload.status,
            },
            &actor,
        )
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(updated))
}

// Handler: Delete Post (admin only)
pub async fn delete_post_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Extension(claims): Extension<Claims>,
    meta: Option<Extension<RequestMeta>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError {
        error: HandlerErrorKind::BadRequest,
        message: "Invalid post id".to_string(),
        details: None,
    })?;
    let actor = actor_context(&claims, meta.as_ref().map(|m| &m.0));
    service.delete(id, &actor).await.map_err(HandlerError::from)?;
    Ok(Json("Post deleted"))
}

// Handler: Toggle Post Status (admin only)
pub async fn toggle_post_status_handler(
    State(service): State<Arc<BlogServiceImpl>>,
    Extension(claims): Extension<Claims>,
    meta: Option<Extension<RequestMeta>>,
    Path((id,)): Path<(String,)>,
) -> Result<impl IntoResponse, HandlerError> {
    let id = ObjectId::parse_str(&id).map_err(|_| HandlerError {
        error: HandlerErrorKind::BadRequest,
        message: "Invalid post id".to_string(),
        details: None,
    })?;
    let actor = actor_context(&claims, meta.as_ref().map(|m| &m.0));
    let updated = service
        .toggle_status(id, &actor)
        .await
        .map_err(HandlerError::from)?;
    Ok(Json(updated))
}
