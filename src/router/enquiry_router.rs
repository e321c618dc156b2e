
use axum::{Router, routing::{post, get, put}, middleware};
use crate::handler::enquiry_handler::{
    submit_enquiry_handler,
    list_enquiries_handler,
    get_enquiry_handler,
    update_enquiry_status_handler,
    archive_enquiry_handler,
    unarchive_enquiry_handler,
    add_enquiry_comment_handler,
};
use std::sync::Arc;
use crate::service::enquiry_service::EnquiryServiceImpl;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};


pub fn enquiry_router(service: Arc<EnquiryServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    // Public contact form route
    let public = Router::new()
        .route("/enquiries", post(submit_enquiry_handler));

    // Admin-protected review routes
    let admin = Router::new()
        .route("/enquiries", get(list_enquiries_handler))
        .route("/enquiries/{id}", get(get_enquiry_handler))
        .route("/enquiries/{id}/status", put(update_enquiry_status_handler))
        .route("/enquiries/{id}/archive", put(archive_enquiry_handler))
        .route("/enquiries/{id}/unarchive", put(unarchive_enquiry_handler))
        .route("/enquiries/{id}/comment", put(add_enquiry_comment_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state.clone(), admin_auth));

    public
        .merge(admin)
        .with_state(service)
}
