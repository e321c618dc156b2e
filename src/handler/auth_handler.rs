use axum::{extract::{State, Json}, response::IntoResponse, Extension};
use crate::handler::actor_context;
use crate::middlewares::request_meta::RequestMeta;
use crate::service::auth_service::{AuthService, AuthServiceImpl};
use crate::util::error::{HandlerError, HandlerErrorKind, ServiceError};
use crate::util::jwt::Claims;
use std::sync::Arc;
use serde::Deserialize;
use validator::Validate;


#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8, max = 128))]
    pub password: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RefreshTokenRequest {
    #[validate(length(min = 10))]
    pub refresh_token: String,
}


// Login
pub async fn login_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    meta: Option<Extension<RequestMeta>>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError {
            error: HandlerErrorKind::BadRequest,
            message: format!("Validation error: {}", e),
            details: None,
        });
    }
    let (ip_address, user_agent) = meta
        .map(|Extension(m)| (m.ip_address, m.user_agent))
        .unwrap_or((None, None));
    let res = service
        .login(payload.email, payload.password, ip_address, user_agent)
        .await
        .map_err(|e| match e {
            // A missing account and a wrong password answer the same way.
            ServiceError::NotFound(_) | ServiceError::InvalidInput(_) => HandlerError {
                error: HandlerErrorKind::Unauthorized,
                message: "Invalid credentials".to_string(),
                details: None,
            },
            other => HandlerError::from(other),
        })?;
    Ok(Json(res))
}


// Logout
pub async fn logout_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    Extension(claims): Extension<Claims>,
    meta: Option<Extension<RequestMeta>>,
) -> Result<impl IntoResponse, HandlerError> {
    let actor = actor_context(&claims, meta.as_ref().map(|m| &m.0));
    service.logout(&actor).await.map_err(HandlerError::from)?;
    Ok(Json("Logged out"))
}


// Refresh Token
pub async fn refresh_token_handler(
    State(service): State<Arc<AuthServiceImpl>>,
    Json(payload): Json<RefreshTokenRequest>,
) -> Result<impl IntoResponse, HandlerError> {
    if let Err(e) = payload.validate() {
        return Err(HandlerError {
            error: HandlerErrorKind::BadRequest,
            message: format!("Validation error: {}", e),
            details: None,
        });
    }
    let res = service
        .refresh_token(payload.refresh_token)
        .await
        .map_err(|e| match e {
            ServiceError::InvalidInput(_) => HandlerError {
                error: HandlerErrorKind::Unauthorized,
                message: "Invalid refresh token".to_string(),
                details: None,
            },
            other => HandlerError::from(other),
        })?;
    Ok(Json(res))
}
