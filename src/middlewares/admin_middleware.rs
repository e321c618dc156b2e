use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::util::jwt::{JwtTokenUtils, JwtTokenUtilsImpl};

/// State handed to the auth layer when the admin routes are wired up.
pub struct AdminAuthState {
    pub jwt_utils: Arc<JwtTokenUtilsImpl>,
}

/// Gate in front of every back-office route. Requests without a valid
/// access token get 401; valid tokens lacking the admin role get 403.
/// The verified claims are stored as a request extension so handlers can
/// attribute activity-log entries to the acting admin.
pub async fn admin_auth(
    State(state): State<Arc<AdminAuthState>>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let token = state
        .jwt_utils
        .extract_token_from_header(auth_header)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;
    let claims = state
        .jwt_utils
        .validate_access_token(&token)
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    if !state.jwt_utils.check_role_permission(&claims.role, "admin") {
        debug!(role = %claims.role, "Rejected non-admin token");
        return Err(StatusCode::FORBIDDEN);
    }

    req.extensions_mut().insert(claims);
    Ok(next.run(req).await)
}
