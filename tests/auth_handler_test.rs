mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt; // for .oneshot()

use common::{settle_audit, InMemoryActivityLogRepository, InMemoryAdminUserRepository};
use coolbreeze_backend::model::activity_log::{ActivityType, EntityType};
use coolbreeze_backend::model::admin_user::AdminUser;
use coolbreeze_backend::router::auth_router::auth_router;
use coolbreeze_backend::service::activity_logger::ActivityLogger;
use coolbreeze_backend::service::auth_service::{AuthService, AuthServiceImpl};

const ADMIN_EMAIL: &str = "admin@coolbreeze.example";
const ADMIN_PASSWORD: &str = "Str0ng!Passw0rd";

struct TestApp {
    app: Router,
    service: Arc<AuthServiceImpl>,
    activity_repo: Arc<InMemoryActivityLogRepository>,
}

fn setup() -> TestApp {
    let user_repo = Arc::new(InMemoryAdminUserRepository::new());
    let activity_repo = Arc::new(InMemoryActivityLogRepository::new());
    let logger = Arc::new(ActivityLogger::new(activity_repo.clone()));
    let jwt_utils = common::test_jwt_utils();
    let service = Arc::new(AuthServiceImpl::new(user_repo, jwt_utils.clone(), logger));
    let app = Router::new().merge(auth_router(
        service.clone(),
        common::test_admin_auth_state(&jwt_utils),
    ));
    TestApp {
        app,
        service,
        activity_repo,
    }
}

async fn register_admin(service: &AuthServiceImpl) {
    let user = AdminUser {
        id: None,
        username: "admin".to_string(),
        first_name: "Asha".to_string(),
        last_name: "Nair".to_string(),
        email: ADMIN_EMAIL.to_string(),
        password_hash: String::new(),
        role: "admin".to_string(),
        created_at: None,
        updated_at: None,
    };
    service.register(user, ADMIN_PASSWORD.to_string()).await.unwrap();
}

async fn json_body(resp: axum::response::Response) -> Value {
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

async fn post_login(app: &Router, email: &str, password: &str) -> axum::response::Response {
    let req = Request::builder()
        .method("POST")
        .uri("/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "email": email, "password": password }).to_string(),
        ))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

#[tokio::test]
async fn test_login_returns_tokens_and_profile() {
    let t = setup();
    register_admin(&t.service).await;

    let resp = post_login(&t.app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;

    assert!(!body["tokens"]["access_token"].as_str().unwrap().is_empty());
    assert!(!body["tokens"]["refresh_token"].as_str().unwrap().is_empty());
    assert_eq!(body["tokens"]["token_type"], "Bearer");
    // 15 minutes from the test config, reported in seconds.
    assert_eq!(body["tokens"]["expires_in"], 900);
    assert_eq!(body["user"]["email"], ADMIN_EMAIL);
    assert_eq!(body["user"]["first_name"], "Asha");
    // The profile never carries the hash.
    assert!(body["user"].get("password_hash").is_none());

    settle_audit().await;
    let entries = t.activity_repo.entries();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].activity_type, ActivityType::Login);
    assert_eq!(entries[0].entity_type, EntityType::User);
    assert_eq!(entries[0].admin_email, ADMIN_EMAIL);
}

#[tokio::test]
async fn test_login_wrong_password_is_unauthorized() {
    let t = setup();
    register_admin(&t.service).await;

    let resp = post_login(&t.app, ADMIN_EMAIL, "WrongPassw0rd!").await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(resp).await;
    assert_eq!(body["error"], "Unauthorized");
    assert_eq!(body["message"], "Invalid credentials");

    settle_audit().await;
    assert!(t.activity_repo.entries().is_empty(), "failed logins leave no trail entry");
}

#[tokio::test]
async fn test_login_unknown_email_answers_like_wrong_password() {
    let t = setup();
    register_admin(&t.service).await;

    let resp = post_login(&t.app, "nobody@coolbreeze.example", ADMIN_PASSWORD).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(resp).await;
    // Same envelope as a wrong password, no account-existence oracle.
    assert_eq!(body["message"], "Invalid credentials");
}

#[tokio::test]
async fn test_login_validation_rejects_bad_email() {
    let t = setup();
    let resp = post_login(&t.app, "not-an-email", ADMIN_PASSWORD).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body = json_body(resp).await;
    assert_eq!(body["error"], "BadRequest");
}

#[tokio::test]
async fn test_minted_token_opens_admin_routes() {
    let t = setup();
    register_admin(&t.service).await;

    let body = json_body(post_login(&t.app, ADMIN_EMAIL, ADMIN_PASSWORD).await).await;
    let access_token = body["tokens"]["access_token"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .header("authorization", format!("Bearer {}", access_token))
        .body(Body::empty())
        .unwrap();
    let resp = t.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;
    assert_eq!(body, json!("Logged out"));

    settle_audit().await;
    let entries = t.activity_repo.entries();
    assert_eq!(entries.len(), 2);
    assert!(entries.iter().any(|e| e.activity_type == ActivityType::Login));
    assert!(entries.iter().any(|e| e.activity_type == ActivityType::Logout));
}

#[tokio::test]
async fn test_logout_requires_token() {
    let t = setup();
    let req = Request::builder()
        .method("POST")
        .uri("/auth/logout")
        .body(Body::empty())
        .unwrap();
    let resp = t.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_refresh_rotates_tokens() {
    let t = setup();
    register_admin(&t.service).await;

    let body = json_body(post_login(&t.app, ADMIN_EMAIL, ADMIN_PASSWORD).await).await;
    let old_access = body["tokens"]["access_token"].as_str().unwrap().to_string();
    let refresh_token = body["tokens"]["refresh_token"].as_str().unwrap().to_string();

    let req = Request::builder()
        .method("POST")
        .uri("/auth/refresh-token")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "refresh_token": refresh_token }).to_string()))
        .unwrap();
    let resp = t.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body = json_body(resp).await;

    let new_access = body["tokens"].get("access_token");
    // The refresh response is a bare token pair, not the login envelope.
    assert!(new_access.is_none());
    assert!(!body["access_token"].as_str().unwrap().is_empty());
    assert_ne!(body["access_token"], old_access);
    assert_eq!(body["token_type"], "Bearer");
}

#[tokio::test]
async fn test_refresh_rejects_garbage_token() {
    let t = setup();
    let req = Request::builder()
        .method("POST")
        .uri("/auth/refresh-token")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({ "refresh_token": "garbage-refresh-token-value" }).to_string(),
        ))
        .unwrap();
    let resp = t.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body = json_body(resp).await;
    assert_eq!(body["message"], "Invalid refresh token");
}

#[tokio::test]
async fn test_refresh_validation_rejects_short_token() {
    let t = setup();
    let req = Request::builder()
        .method("POST")
        .uri("/auth/refresh-token")
        .header("content-type", "application/json")
        .body(Body::from(json!({ "refresh_token": "short" }).to_string()))
        .unwrap();
    let resp = t.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_audit_outage_does_not_block_login() {
    let t = setup();
    register_admin(&t.service).await;
    t.activity_repo.fail_append.store(true, Ordering::SeqCst);

    let resp = post_login(&t.app, ADMIN_EMAIL, ADMIN_PASSWORD).await;
    assert_eq!(resp.status(), StatusCode::OK);

    settle_audit().await;
    assert!(t.activity_repo.entries().is_empty());
}
