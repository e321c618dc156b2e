
use axum::{Router, routing::get, middleware};
use crate::handler::activity_handler::list_activity_logs_handler;
use std::sync::Arc;
use crate::service::activity_logger::ActivityLogger;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};


pub fn activity_router(logger: Arc<ActivityLogger>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    // The audit trail is admin-only end to end
    Router::new()
        .route("/activity-logs", get(list_activity_logs_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state.clone(), admin_auth))
        .with_state(logger)
}
