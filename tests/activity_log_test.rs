mod common;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt; // for .oneshot()

use common::{
    admin_bearer_token, sample_enquiry, settle_audit, InMemoryActivityLogRepository,
    InMemoryEnquiryRepository,
};
use coolbreeze_backend::model::activity_log::{ActivityType, EntityType};
use coolbreeze_backend::model::enquiry::EnquiryStatus;
use coolbreeze_backend::repository::enquiry_repo::EnquiryRepository;
use coolbreeze_backend::router::activity_router::activity_router;
use coolbreeze_backend::router::enquiry_router::enquiry_router;
use coolbreeze_backend::service::activity_logger::{ActivityEntry, ActivityLogger, ActorContext};
use coolbreeze_backend::service::enquiry_service::EnquiryServiceImpl;

struct TestApp {
    app: Router,
    logger: Arc<ActivityLogger>,
    activity_repo: Arc<InMemoryActivityLogRepository>,
    admin_header: String,
}

fn setup() -> TestApp {
    let activity_repo = Arc::new(InMemoryActivityLogRepository::new());
    let logger = Arc::new(ActivityLogger::new(activity_repo.clone()));
    let jwt_utils = common::test_jwt_utils();
    let admin_header = admin_bearer_token(&jwt_utils);
    let app = Router::new().merge(activity_router(
        logger.clone(),
        common::test_admin_auth_state(&jwt_utils),
    ));
    TestApp {
        app,
        logger,
        activity_repo,
        admin_header,
    }
}

fn actor() -> ActorContext {
    ActorContext {
        admin_id: "admin123".to_string(),
        admin_email: "admin@coolbreeze.example".to_string(),
        ip_address: Some("203.0.113.9".to_string()),
        user_agent: None,
    }
}

fn entry(activity_type: ActivityType, entity_type: EntityType) -> ActivityEntry {
    ActivityEntry {
        activity_type,
        entity_type,
        entity_id: None,
        details: None,
        previous_values: None,
        new_values: None,
    }
}

async fn fetch(app: &Router, admin_header: &str, uri: &str) -> Value {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .header("authorization", admin_header)
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_activity_listing_requires_admin_token() {
    let t = setup();
    let req = Request::builder()
        .method("GET")
        .uri("/activity-logs")
        .body(Body::empty())
        .unwrap();
    let resp = t.app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_activity_listing_is_newest_first() {
    let t = setup();

    t.logger.record(&actor(), entry(ActivityType::Login, EntityType::User));
    settle_audit().await;
    tokio::time::sleep(Duration::from_millis(5)).await;
    t.logger.record(
        &actor(),
        entry(ActivityType::EnquiryStatusChange, EntityType::Enquiry),
    );
    settle_audit().await;

    let body = fetch(&t.app, &t.admin_header, "/activity-logs").await;
    assert_eq!(body["total_count"], 2);
    let logs = body["logs"].as_array().unwrap();
    assert_eq!(logs.len(), 2);
    assert_eq!(logs[0]["activity_type"], "enquiry_status_change");
    assert_eq!(logs[1]["activity_type"], "login");
    assert_eq!(logs[0]["admin_email"], "admin@coolbreeze.example");
    assert_eq!(logs[0]["ip_address"], "203.0.113.9");
}

#[tokio::test]
async fn test_activity_listing_filters_by_action_and_entity() {
    let t = setup();

    t.logger.record(&actor(), entry(ActivityType::Login, EntityType::User));
    t.logger.record(
        &actor(),
        entry(ActivityType::EnquiryStatusChange, EntityType::Enquiry),
    );
    t.logger.record(
        &actor(),
        entry(ActivityType::ContentModification, EntityType::BlogPost),
    );
    settle_audit().await;

    let body = fetch(&t.app, &t.admin_header, "/activity-logs?activity_type=login").await;
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["logs"][0]["activity_type"], "login");

    let body = fetch(&t.app, &t.admin_header, "/activity-logs?entity_type=enquiry").await;
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["logs"][0]["entity_type"], "enquiry");

    let body = fetch(
        &t.app,
        &t.admin_header,
        "/activity-logs?activity_type=content_modification&entity_type=blog_post",
    )
    .await;
    assert_eq!(body["total_count"], 1);
    assert_eq!(body["logs"][0]["activity_type"], "content_modification");
}

#[tokio::test]
async fn test_activity_listing_pages() {
    let t = setup();
    for _ in 0..3 {
        t.logger.record(&actor(), entry(ActivityType::DataAccess, EntityType::System));
    }
    settle_audit().await;

    let body = fetch(&t.app, &t.admin_header, "/activity-logs?page=1&limit=2").await;
    assert_eq!(body["logs"].as_array().unwrap().len(), 2);
    assert_eq!(body["total_count"], 3);
    assert_eq!(body["page"], 1);
    assert_eq!(body["limit"], 2);

    let body = fetch(&t.app, &t.admin_header, "/activity-logs?page=2&limit=2").await;
    assert_eq!(body["logs"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_audit_outage_never_blocks_the_audited_action() {
    // Wire an enquiry app onto an activity store that refuses every append.
    let enquiry_repo = Arc::new(InMemoryEnquiryRepository::new());
    let activity_repo = Arc::new(InMemoryActivityLogRepository::new());
    activity_repo.fail_append.store(true, Ordering::SeqCst);
    let logger = Arc::new(ActivityLogger::new(activity_repo.clone()));
    let service = Arc::new(EnquiryServiceImpl::new(enquiry_repo.clone(), logger));
    let jwt_utils = common::test_jwt_utils();
    let admin_header = admin_bearer_token(&jwt_utils);
    let app = Router::new().merge(enquiry_router(
        service,
        common::test_admin_auth_state(&jwt_utils),
    ));

    let created = enquiry_repo
        .create(sample_enquiry("ravi@example.com", "9876543210"))
        .await
        .unwrap();
    let id = created.id.unwrap();

    let req = Request::builder()
        .method("PUT")
        .uri(format!("/enquiries/{}/status", id.to_hex()))
        .header("authorization", &admin_header)
        .header("content-type", "application/json")
        .body(Body::from(json!({ "status": "contacted" }).to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();

    // The write succeeded even though its audit entry was lost.
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(enquiry_repo.find(id).unwrap().status, EnquiryStatus::Contacted);
    settle_audit().await;
    assert!(activity_repo.entries().is_empty());
}
