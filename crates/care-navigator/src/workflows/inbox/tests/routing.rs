use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use super::common::*;
use crate::workflows::directory::domain::ListingId;
use crate::workflows::inbox::domain::ReviewStatus;
use crate::workflows::inbox::inbox_router;
use crate::workflows::inbox::repository::InboxRepository;

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

#[tokio::test]
async fn contact_route_returns_created() {
    let (service, _, _) = service_with(Arc::new(RecordingNotifier::default()));
    let router = inbox_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/api/v1/directory/harbor/contact",
            json!({
                "name": "Jordan",
                "email": "jordan@example.org",
                "message": "Are you accepting new clients?"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CREATED);
    let payload = read_json_body(response).await;
    assert_eq!(payload["listing_id"], "harbor");
    assert!(payload["id"].as_str().unwrap_or_default().starts_with("msg_"));
}

#[tokio::test]
async fn review_route_reports_invalid_rating() {
    let (service, _, _) = service_with(Arc::new(RecordingNotifier::default()));
    let router = inbox_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/api/v1/directory/harbor/reviews",
            json!({ "rating": 9, "body": "Great" }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let payload = read_json_body(response).await;
    assert_eq!(payload["code"], "VALIDATION_ERROR");
    assert!(payload["fields"].get("rating").is_some());
}

#[tokio::test]
async fn claim_route_conflicts_on_claimed_listing() {
    let (service, _, _) = service_with(Arc::new(RecordingNotifier::default()));
    let router = inbox_router(Arc::new(service));

    let response = router
        .oneshot(post_json(
            "/api/v1/directory/claimed/claims",
            json!({
                "user_id": "user-42",
                "name": "Dr. Rivera",
                "email": "rivera@example.org"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::CONFLICT);
    let payload = read_json_body(response).await;
    assert_eq!(payload["code"], "CONFLICT");
}

#[tokio::test]
async fn reviews_route_lists_published_reviews() {
    let (service, _, inbox) = service_with(Arc::new(RecordingNotifier::default()));
    let mut first = service
        .submit_review(&ListingId("harbor".to_string()), review(5))
        .expect("review stored");
    first.status = ReviewStatus::Published;
    inbox.update_review(first).expect("publish");
    service
        .submit_review(&ListingId("harbor".to_string()), review(2))
        .expect("pending review");
    let router = inbox_router(Arc::new(service));

    let response = router
        .oneshot(
            Request::get("/api/v1/directory/harbor/reviews?limit=10")
                .body(Body::empty())
                .expect("request"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["total_count"], 1);
    assert_eq!(payload["items"][0]["rating"], 5);
}
