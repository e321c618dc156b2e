
use axum::{Router, routing::{get, put}, middleware};
use tower_http::cors::CorsLayer;
use crate::handler::lead_handler::{
    justdial_webhook_handler,
    justdial_webhook_options_handler,
    list_leads_handler,
    mark_lead_processed_handler,
};
use std::sync::Arc;
use crate::service::lead_service::LeadServiceImpl;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};


pub fn lead_router(service: Arc<LeadServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    // JustDial calls the webhook as a plain GET from their servers; the
    // open CORS layer keeps their dashboard test button working too.
    let webhook = Router::new()
        .route(
            "/webhooks/justdial",
            get(justdial_webhook_handler).options(justdial_webhook_options_handler),
        )
        .layer(CorsLayer::permissive());

    // Admin-protected lead listing
    let admin = Router::new()
        .route("/leads", get(list_leads_handler))
        .route("/leads/{id}/processed", put(mark_lead_processed_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state.clone(), admin_auth));

    webhook
        .merge(admin)
        .with_state(service)
}
