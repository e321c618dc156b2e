use axum::{body::Body, extract::ConnectInfo, http::Request, middleware::Next, response::Response};
use std::net::SocketAddr;

/// Client metadata attached to every request for activity-log attribution.
#[derive(Debug, Clone)]
pub struct RequestMeta {
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
}

/// Resolves the client address from proxy headers first, falling back to
/// the socket peer address.
pub async fn capture_request_meta(mut req: Request<Body>, next: Next) -> Response {
    let headers = req.headers();
    let ip_address = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|v| v.trim().to_string())
        .or_else(|| {
            headers
                .get("x-real-ip")
                .and_then(|v| v.to_str().ok())
                .map(|v| v.to_string())
        })
        .or_else(|| {
            req.extensions()
                .get::<ConnectInfo<SocketAddr>>()
                .map(|info| info.0.ip().to_string())
        });
    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string());

    req.extensions_mut().insert(RequestMeta {
        ip_address,
        user_agent,
    });
    next.run(req).await
}
