use super::common::*;
use axum::body::Body;
use axum::extract::State;
use axum::http::{header, Request, StatusCode};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use crate::workflows::profiles::domain::FeedbackSubmission;
use crate::workflows::profiles::{DisabledNotes, ProfilingService};

fn json_request(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(serde_json::to_vec(&body).expect("encode body")))
        .expect("request builds")
}

#[tokio::test]
async fn submit_route_returns_assessed_profile() {
    let (service, _, _) = build_service();
    let router = profile_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "/api/v1/profiles",
            json!({
                "answers": { "age": 42, "smoker": true, "exercise": "rarely", "diet": "high sugar" },
                "sessionId": "session-a"
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert!(payload.get("id").and_then(|id| id.as_str()).is_some());
    assert!(payload.get("createdAt").and_then(|ts| ts.as_i64()).is_some());
    assert_eq!(payload["parse"]["status"], json!("ok"));
    assert_eq!(payload["risk"]["risk_level"], json!("high"));
    assert_eq!(payload["risk"]["score"], json!(90));
    assert_eq!(
        payload["factors"]["factors"],
        json!(["smoking", "low exercise", "poor diet"])
    );
    assert_eq!(
        payload["recommendation"]["recommendations"],
        json!([
            "Quit smoking (seek professional support)",
            "Reduce sugar and ultra-processed foods",
            "Walk 30 minutes daily and add light strength work"
        ])
    );
}

#[tokio::test]
async fn submit_route_reports_incomplete_profiles_with_ok_status() {
    let (service, _, _) = build_service();
    let router = profile_router_with_service(service);

    let response = router
        .oneshot(json_request("/api/v1/profiles", json!({})))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["parse"]["status"], json!("incomplete_profile"));
    assert_eq!(payload["parse"]["reason"], json!(">50% fields missing"));
    assert!(payload.get("risk").is_none());
}

#[tokio::test]
async fn list_route_returns_persisted_profiles() {
    let (service, _, _) = build_service();
    let service = Arc::new(service);
    let mut submission = healthy_text_submission();
    submission.persist = true;
    service.process(submission).await.expect("profile builds");

    let response = crate::workflows::profiles::router::list_handler::<MemoryStore, ScriptedNotes>(
        State(service),
    )
    .await;

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    let items = payload["items"].as_array().expect("items array");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["risk"]["risk_level"], json!("low"));
    assert_eq!(items[0]["risk"]["score"], json!(10));
}

#[tokio::test]
async fn feedback_route_returns_updated_weights() {
    let (service, _, _) = build_service();
    let router = profile_router_with_service(service);

    let response = router
        .oneshot(json_request(
            "/api/v1/profiles/feedback",
            json!({
                "sessionId": "session-c",
                "profileId": "p-9",
                "helpful": false,
                "factors": ["smoking", "poor diet"]
            }),
        ))
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let payload = read_json_body(response).await;
    assert_eq!(payload["ok"], json!(true));
    assert_eq!(
        payload["weights"],
        json!({ "poor diet": 0.9, "smoking": 0.9 })
    );
}

#[tokio::test]
async fn feedback_handler_rejects_missing_factors() {
    let (service, store, _) = build_service();

    let response =
        crate::workflows::profiles::router::feedback_handler::<MemoryStore, ScriptedNotes>(
            State(Arc::new(service)),
            axum::Json(FeedbackSubmission {
                session_id: Some("session-d".to_string()),
                ..FeedbackSubmission::default()
            }),
        )
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let payload = read_json_body(response).await;
    assert_eq!(payload["error"], json!("Missing sessionId or factors"));
    assert_eq!(store.session_count(), 0);
}

#[tokio::test]
async fn store_failures_map_to_internal_error() {
    let service = Arc::new(ProfilingService::new(
        Arc::new(UnavailableStore),
        Arc::new(DisabledNotes),
    ));

    let response =
        crate::workflows::profiles::router::list_handler::<UnavailableStore, DisabledNotes>(
            State(service),
        )
        .await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let payload = read_json_body(response).await;
    assert!(payload["error"]
        .as_str()
        .unwrap_or_default()
        .contains("kv offline"));
}
