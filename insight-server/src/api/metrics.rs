//! Metrics handlers

use axum::{
    extract::{RawQuery, State},
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    response::Json,
};
use serde_json::Value;

use insight_core::ForwardOptions;
use insight_types::{ErrorDetailsEnvelope, ErrorEnvelope};

use super::{query_value, relay_json};
use crate::state::AppState;

const HISTORICAL_PATH: &str = "/metrics/historical";
const RAW_PATH: &str = "/metrics/raw";
const TRENDS_PATH: &str = "/metrics/trends";

pub const DEFAULT_TIME_RANGE: &str = "1h";
pub const DEFAULT_INTERVAL: &str = "5m";

type EnvelopeResult = Result<Json<Value>, (StatusCode, Json<ErrorEnvelope>)>;

pub async fn get_historical_metrics(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> EnvelopeResult {
    let time_range = query_value(query.as_deref(), "time_range")
        .unwrap_or_else(|| DEFAULT_TIME_RANGE.to_string());
    let interval =
        query_value(query.as_deref(), "interval").unwrap_or_else(|| DEFAULT_INTERVAL.to_string());

    let forwarded = url::form_urlencoded::Serializer::new(String::new())
        .append_pair("time_range", &time_range)
        .append_pair("interval", &interval)
        .finish();

    let outgoing = state.tenant_headers(&headers, query.as_deref(), HeaderMap::new());
    let options = ForwardOptions::get().with_query(forwarded).with_headers(outgoing);

    relay_json(&state, HISTORICAL_PATH, options).await.map(Json).map_err(|e| {
        tracing::error!(route = HISTORICAL_PATH, error = %e, "Failed to fetch historical metrics");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorEnvelope::new("Failed to fetch historical metrics")),
        )
    })
}

/// Raw metrics: the query string and `Authorization` reach the backend as sent.
pub async fn get_raw_metrics(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Json<Value>, (StatusCode, Json<ErrorDetailsEnvelope>)> {
    let mut base = HeaderMap::new();
    if let Some(auth) = headers.get(AUTHORIZATION) {
        base.insert(AUTHORIZATION, auth.clone());
    }

    let outgoing = state.tenant_headers(&headers, query.as_deref(), base);
    let mut options = ForwardOptions::get().with_headers(outgoing);
    if let Some(query) = query {
        options = options.with_query(query);
    }

    relay_json(&state, RAW_PATH, options).await.map(Json).map_err(|e| {
        tracing::error!(route = RAW_PATH, error = %e, "Failed to fetch raw metrics");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDetailsEnvelope::new("Failed to fetch raw metrics", e.to_string())),
        )
    })
}

pub async fn get_metric_trends(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> EnvelopeResult {
    let outgoing = state.tenant_headers(&headers, query.as_deref(), HeaderMap::new());

    relay_json(&state, TRENDS_PATH, ForwardOptions::get().with_headers(outgoing))
        .await
        .map(Json)
        .map_err(|e| {
            tracing::error!(route = TRENDS_PATH, error = %e, "Failed to fetch metric trends");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorEnvelope::new("Failed to fetch metric trends")))
        })
}
