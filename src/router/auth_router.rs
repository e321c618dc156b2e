use axum::{Router, routing::{post}, middleware};
use crate::handler::auth_handler::{
    login_handler,
    logout_handler,
    refresh_token_handler,
};
use std::sync::Arc;
use crate::service::auth_service::AuthServiceImpl;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};

pub fn auth_router(service: Arc<AuthServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    // Public login route
    let public = Router::new()
        .route("/auth/login", post(login_handler));

    // Public refresh-token route
    let public = public
        .route("/auth/refresh-token", post(refresh_token_handler));

    // Logout needs a valid token so the activity trail knows who left
    let admin = Router::new()
        .route("/auth/logout", post(logout_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state.clone(), admin_auth));

    public
        .merge(admin)
        .with_state(service)
}
