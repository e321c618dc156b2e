
use axum::{Router, routing::{post, get, put}, middleware};
use crate::handler::testimonial_handler::{
    submit_testimonial_handler,
    list_approved_testimonials_handler,
    list_testimonials_handler,
    set_testimonial_status_handler,
    restore_testimonial_handler,
};
use std::sync::Arc;
use crate::service::testimonial_service::TestimonialServiceImpl;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};


pub fn testimonial_router(service: Arc<TestimonialServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    // Public routes: form submission and the approved wall
    let public = Router::new()
        .route("/testimonials", post(submit_testimonial_handler))
        .route("/testimonials", get(list_approved_testimonials_handler));

    // Admin-protected moderation routes
    let admin = Router::new()
        .route("/testimonials/moderation", get(list_testimonials_handler))
        .route("/testimonials/{id}/status", put(set_testimonial_status_handler))
        .route("/testimonials/{id}/restore", put(restore_testimonial_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state.clone(), admin_auth));

    public
        .merge(admin)
        .with_state(service)
}
