//! Backend connection test.

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde_json::Value;

use insight_core::ForwardOptions;
use insight_types::ConnectionTestError;

use super::relay_json_checked;
use crate::state::AppState;

const BACKEND_PATH: &str = "/connection/test";

type ConnectionResult = Result<Json<Value>, (StatusCode, Json<ConnectionTestError>)>;

pub async fn test_connection(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> ConnectionResult {
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(route = BACKEND_PATH, error = %e, "Rejected connection test body");
        (
            StatusCode::BAD_REQUEST,
            Json(ConnectionTestError::new("Request body must be a JSON document")),
        )
    })?;

    let outgoing = state.tenant_headers(&headers, query.as_deref(), HeaderMap::new());
    let options = ForwardOptions::post_json(payload).with_headers(outgoing);

    match relay_json_checked(&state, BACKEND_PATH, options).await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            tracing::error!(route = BACKEND_PATH, error = %e, "Connection test failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ConnectionTestError::new("Failed to test connection")),
            ))
        },
    }
}
