//! Integration tests for the HTTP API
//!
//! Drives the session endpoints with tower's oneshot, the way a
//! front-end would over the wire.

use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use serde_json::{json, Value};
use tower::ServiceExt;

use choreo::core::create_router;
use choreo::COMMIT_DURATION_MS;

fn create_test_router() -> axum::Router {
    create_router()
}

async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn get_json(app: &axum::Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn new_session(app: &axum::Router, body: Value) -> String {
    let (status, json) = post_json(app, "/session/new", body).await;
    assert_eq!(status, StatusCode::OK);
    json["session_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_health_endpoint() {
    let app = create_test_router();

    let (status, json) = get_json(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}

#[tokio::test]
async fn test_create_session_full_tier() {
    let app = create_test_router();

    let (status, json) = post_json(
        &app,
        "/session/new",
        json!({
            "device_pixel_ratio": 2.0,
            "pillars": {"execution": "#e8491d"}
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(json["session_id"].is_string());
    assert!(json["websocket_url"].is_string());
    assert_eq!(json["tier"], "FULL");
    assert_eq!(json["scale"], 2.0);
}

#[tokio::test]
async fn test_create_session_safe_tier() {
    let app = create_test_router();

    let (status, json) = post_json(
        &app,
        "/session/new",
        json!({
            "signals": {"reduced_motion": true},
            "device_pixel_ratio": 2.0
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["tier"], "SAFE");
    assert_eq!(json["scale"], 1.0);
}

#[tokio::test]
async fn test_commit_then_auto_advance() {
    let app = create_test_router();
    let id = new_session(&app, json!({"pillars": {"execution": "#e8491d"}})).await;

    let (status, json) = post_json(
        &app,
        &format!("/session/{}/event", id),
        json!({"type": "commit", "id": "execution", "origin": {"x": 0.1, "y": -0.2}}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["phase"], "COMMIT");
    assert_eq!(json["reason"], "R103_COMMIT_ACCEPTED");
    assert_eq!(json["selected_id"], "execution");

    // Sessions run on the real clock; give the commit window time to pass
    tokio::time::sleep(std::time::Duration::from_millis(COMMIT_DURATION_MS + 60)).await;

    let (status, json) = get_json(&app, &format!("/session/{}", id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["phase"], "DIVE");
    assert_eq!(json["hovered_id"], "execution");
}

#[tokio::test]
async fn test_reset_event() {
    let app = create_test_router();
    let id = new_session(&app, json!({})).await;

    post_json(
        &app,
        &format!("/session/{}/event", id),
        json!({"type": "commit", "id": "design", "origin": {"x": 0.0, "y": 0.0}}),
    )
    .await;

    let (status, json) = post_json(
        &app,
        &format!("/session/{}/event", id),
        json!({"type": "reset"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["phase"], "IDLE");
    assert_eq!(json["reason"], "R105_RESET");
    assert!(json["selected_id"].is_null());
}

#[tokio::test]
async fn test_frames_warm_up_then_streak() {
    let app = create_test_router();
    let id = new_session(&app, json!({"device_pixel_ratio": 2.0})).await;
    let uri = format!("/session/{}/frames", id);

    // Partial window: warm-up, no adjustment
    let (status, json) = post_json(&app, &uri, json!({"samples_ms": vec![25.0; 10]})).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["reason"], "R201_QUALITY_WARMUP");
    assert_eq!(json["scale"], 2.0);

    // Full window of pressure: streak starts building
    let (_, json) = post_json(&app, &uri, json!({"samples_ms": vec![25.0; 60]})).await;
    assert_eq!(json["reason"], "R203_QUALITY_STREAK_BUILDING");
    assert_eq!(json["bad_streak"], 1);
    assert_eq!(json["scale"], 2.0);
}

#[tokio::test]
async fn test_visibility_toggle() {
    let app = create_test_router();
    let id = new_session(&app, json!({})).await;

    let (status, _) = post_json(
        &app,
        &format!("/session/{}/visibility", id),
        json!({"visible": false}),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    // Samples posted while hidden are dropped
    let (_, json) = post_json(
        &app,
        &format!("/session/{}/frames", id),
        json!({"samples_ms": vec![25.0; 60]}),
    )
    .await;
    assert_eq!(json["reason"], "R201_QUALITY_WARMUP");
}

#[tokio::test]
async fn test_handoff_missing_is_404() {
    let app = create_test_router();
    let id = new_session(&app, json!({})).await;

    let (status, _) = get_json(&app, &format!("/session/{}/handoff", id)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_unknown_session_is_404() {
    let app = create_test_router();

    let (status, _) = get_json(&app, "/session/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = post_json(
        &app,
        "/session/nope/event",
        json!({"type": "reset"}),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
