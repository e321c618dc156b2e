
use axum::{Router, routing::{post, get, put, delete}, middleware};
use crate::handler::blog_handler::{
    list_published_posts_handler,
    get_published_post_handler,
    list_all_posts_handler,
    get_post_handler,
    create_post_handler,
    update_post_handler,
    delete_post_handler,
    toggle_post_status_handler,
};
use std::sync::Arc;
use crate::service::blog_service::BlogServiceImpl;
use crate::middlewares::admin_middleware::{admin_auth, AdminAuthState};


pub fn blog_router(service: Arc<BlogServiceImpl>, admin_auth_state: Arc<AdminAuthState>) -> Router {
    // Public routes: published posts only
    let public = Router::new()
        .route("/posts", get(list_published_posts_handler))
        .route("/posts/slug/{slug}", get(get_published_post_handler));

    // Admin-protected editor routes
    let admin = Router::new()
        .route("/posts/all", get(list_all_posts_handler))
        .route("/posts/{id}", get(get_post_handler))
        .route("/posts", post(create_post_handler))
        .route("/posts/{id}", put(update_post_handler))
        .route("/posts/{id}", delete(delete_post_handler))
        .route("/posts/{id}/status", put(toggle_post_status_handler))
        .route_layer(middleware::from_fn_with_state(admin_auth_state.clone(), admin_auth));

    public
        .merge(admin)
        .with_state(service)
}
