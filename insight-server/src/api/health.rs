use axum::{
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde_json::Value;

use insight_core::ForwardOptions;
use insight_types::HealthErrorEnvelope;

use super::relay_json;
use crate::state::AppState;

const BACKEND_PATH: &str = "/health";

pub async fn get_backend_health(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> Result<Json<Value>, (StatusCode, Json<HealthErrorEnvelope>)> {
    let outgoing = state.tenant_headers(&headers, query.as_deref(), HeaderMap::new());

    match relay_json(&state, BACKEND_PATH, ForwardOptions::get().with_headers(outgoing)).await {
        Ok(body) => Ok(Json(body)),
        Err(e) => {
            tracing::error!(route = BACKEND_PATH, error = %e, "Backend health check failed");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HealthErrorEnvelope::new("Backend health check failed", e.to_string())),
            ))
        },
    }
}
