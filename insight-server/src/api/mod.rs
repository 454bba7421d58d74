//! API Routes
//!
//! Thin adapters over the backend API. Each route resolves the tenant,
//! forwards once through the shared forwarder and relays the JSON body, or
//! answers with its own fixed error envelope.

mod connection;
mod health;
mod metrics;
mod suggestions;

#[cfg(test)]
mod suggestions_tests;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use serde_json::Value;

use insight_core::{read_json_body, require_success, ForwardOptions, GatewayResult};
use insight_types::ErrorEnvelope;

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new()
        // Connectivity
        .route("/connection/test", post(connection::test_connection))
        .route("/health", get(health::get_backend_health))
        // Metrics
        .route("/metrics/historical", get(metrics::get_historical_metrics))
        .route("/metrics/raw", get(metrics::get_raw_metrics))
        .route("/metrics/trends", get(metrics::get_metric_trends))
        // Suggestions
        .route("/suggestions", get(suggestions::list_suggestions))
        .route("/suggestions/apply", post(suggestions::apply_suggestion))
        // API fallback: return 404 for unknown API endpoints
        .fallback(api_not_found)
}

async fn api_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(ErrorEnvelope::new("Not found")))
}

/// Forward and decode the JSON body, whatever the backend status.
pub(crate) async fn relay_json(
    state: &AppState,
    path: &str,
    options: ForwardOptions,
) -> GatewayResult<Value> {
    let response = state.forwarder().forward(path, options).await?;
    read_json_body(response).await
}

/// Like [`relay_json`], but a non-2xx backend status is an error.
pub(crate) async fn relay_json_checked(
    state: &AppState,
    path: &str,
    options: ForwardOptions,
) -> GatewayResult<Value> {
    let response = state.forwarder().forward(path, options).await?;
    let response = require_success(response).await?;
    read_json_body(response).await
}

/// Value of the first `key` in a raw query string, ignoring empty values.
pub(crate) fn query_value(query: Option<&str>, key: &str) -> Option<String> {
    url::form_urlencoded::parse(query?.as_bytes())
        .filter(|(k, _)| k == key)
        .map(|(_, v)| v.into_owned())
        .find(|v| !v.is_empty())
}
