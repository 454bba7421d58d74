#![allow(clippy::unwrap_used, clippy::indexing_slicing, reason = "test assertions")]

use axum::extract::{RawQuery, State};
use axum::http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use serde_json::{json, Value};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use super::suggestions::list_suggestions;
use crate::state::AppState;
use crate::test_helpers::{test_config, test_server, test_server_for, unreachable_backend_url};

fn assert_send<T: Send>(_: &T) {}

async fn backend_rejecting_all_calls() -> MockServer {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&backend)
        .await;
    backend
}

#[tokio::test]
async fn test_apply_forwards_body_verbatim() {
    let backend = MockServer::start().await;
    let payload = json!({"recommendation_id": "rec-42", "action": "apply", "note": "approved"});
    Mock::given(method("POST"))
        .and(path("/suggestions/apply"))
        .and(body_json(&payload))
        .and(header("content-type", "application/json"))
        .and(header("x-tenant-id", "acme"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "applied"})))
        .expect(1)
        .mount(&backend)
        .await;

    let response = test_server(&backend)
        .post("/api/suggestions/apply")
        .add_header(HeaderName::from_static("x-tenant-id"), HeaderValue::from_static("acme"))
        .json(&payload)
        .await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"status": "applied"}));
}

#[tokio::test]
async fn test_rollback_uses_apply_endpoint() {
    let backend = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/suggestions/apply"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "rolled_back"})))
        .expect(1)
        .mount(&backend)
        .await;

    let response = test_server(&backend)
        .post("/api/suggestions/apply")
        .json(&json!({"recommendation_id": 7, "action": "rollback"}))
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_missing_recommendation_id() {
    let backend = backend_rejecting_all_calls().await;
    let server = test_server(&backend);

    for body in [json!({}), json!({"action": "apply"}), json!({"recommendation_id": null}), json!([])] {
        let response = server.post("/api/suggestions/apply").json(&body).await;
        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.json::<Value>(), json!({"error": "Missing recommendation_id"}));
    }
}

#[tokio::test]
async fn test_invalid_json_body() {
    let backend = backend_rejecting_all_calls().await;

    let response = test_server(&backend).post("/api/suggestions/apply").text("recommendation_id=1").await;

    response.assert_status(StatusCode::BAD_REQUEST);
    assert_eq!(response.json::<Value>(), json!({"error": "Invalid JSON body"}));
}

#[tokio::test]
async fn test_apply_unreachable_backend() {
    let response = test_server_for(&unreachable_backend_url())
        .post("/api/suggestions/apply")
        .json(&json!({"recommendation_id": "rec-1"}))
        .await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({"error": "Failed to apply suggestion"}));
}

#[tokio::test]
async fn test_list_forwards_allowed_params_only() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/suggestions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&backend)
        .await;

    let response =
        test_server(&backend).get("/api/suggestions?limit=5&sort=desc&status=pending").await;

    response.assert_status_ok();
    assert_eq!(response.json::<Value>(), json!({"items": []}));
    let requests = backend.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("status=pending&limit=5"));
}

#[tokio::test]
async fn test_list_unreachable_backend() {
    let response = test_server_for(&unreachable_backend_url()).get("/api/suggestions").await;

    response.assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>(), json!({"error": "Failed to fetch suggestions"}));
}

#[tokio::test]
async fn test_list_handler_future_is_send() {
    let state = AppState::new(test_config(&unreachable_backend_url())).unwrap();
    let future =
        list_suggestions(State(state), RawQuery(Some("status=open".to_string())), HeaderMap::new());
    assert_send(&future);
}

#[tokio::test]
async fn test_list_skips_empty_duplicate_params() {
    let backend = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/suggestions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"items": []})))
        .expect(1)
        .mount(&backend)
        .await;

    test_server(&backend).get("/api/suggestions?status=&status=applied").await.assert_status_ok();

    let requests = backend.received_requests().await.unwrap();
    assert_eq!(requests[0].url.query(), Some("status=applied"));
}
