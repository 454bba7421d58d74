//! Optimization suggestions

use axum::{
    body::Bytes,
    extract::{RawQuery, State},
    http::{HeaderMap, StatusCode},
    response::Json,
};
use serde_json::Value;

use insight_core::ForwardOptions;
use insight_types::ErrorEnvelope;

use super::{query_value, relay_json};
use crate::state::AppState;

const LIST_PATH: &str = "/suggestions";
const APPLY_PATH: &str = "/suggestions/apply";

/// Query parameters passed on to the backend listing.
const LIST_PARAMS: &[&str] = &["status", "limit"];

type EnvelopeResult = Result<Json<Value>, (StatusCode, Json<ErrorEnvelope>)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApplyAction {
    Apply,
    Rollback,
}

impl ApplyAction {
    /// Read `action` from the request body. Anything but `rollback` applies.
    pub fn from_body(body: &Value) -> Self {
        match body.get("action").and_then(Value::as_str) {
            Some("rollback") => Self::Rollback,
            _ => Self::Apply,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Apply => "apply",
            Self::Rollback => "rollback",
        }
    }

    /// Backend endpoint for the action. Rollback has no endpoint of its own
    /// yet, so both go to the apply path.
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Apply | Self::Rollback => APPLY_PATH,
        }
    }
}

pub async fn list_suggestions(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
) -> EnvelopeResult {
    // Serializer is !Send; it must not live across the await below.
    let forwarded = {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        for param in LIST_PARAMS {
            if let Some(value) = query_value(query.as_deref(), param) {
                serializer.append_pair(param, &value);
            }
        }
        serializer.finish()
    };

    let outgoing = state.tenant_headers(&headers, query.as_deref(), HeaderMap::new());
    let options = ForwardOptions::get().with_query(forwarded).with_headers(outgoing);

    relay_json(&state, LIST_PATH, options).await.map(Json).map_err(|e| {
        tracing::error!(route = LIST_PATH, error = %e, "Failed to fetch suggestions");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorEnvelope::new("Failed to fetch suggestions")))
    })
}

pub async fn apply_suggestion(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
    headers: HeaderMap,
    body: Bytes,
) -> EnvelopeResult {
    let payload: Value = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!(route = APPLY_PATH, error = %e, "Rejected suggestion body");
        (StatusCode::BAD_REQUEST, Json(ErrorEnvelope::new("Invalid JSON body")))
    })?;

    let has_id = payload.get("recommendation_id").is_some_and(|id| !id.is_null());
    if !has_id {
        return Err((StatusCode::BAD_REQUEST, Json(ErrorEnvelope::new("Missing recommendation_id"))));
    }

    let action = ApplyAction::from_body(&payload);
    tracing::info!(
        recommendation_id = %payload["recommendation_id"],
        action = action.as_str(),
        "Applying suggestion"
    );

    let outgoing = state.tenant_headers(&headers, query.as_deref(), HeaderMap::new());
    let options = ForwardOptions::post_json(payload).with_headers(outgoing);

    relay_json(&state, action.endpoint(), options).await.map(Json).map_err(|e| {
        tracing::error!(route = APPLY_PATH, action = action.as_str(), error = %e, "Failed to apply suggestion");
        (StatusCode::INTERNAL_SERVER_ERROR, Json(ErrorEnvelope::new("Failed to apply suggestion")))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_action_defaults_to_apply() {
        assert_eq!(ApplyAction::from_body(&json!({"recommendation_id": 1})), ApplyAction::Apply);
        assert_eq!(ApplyAction::from_body(&json!({"action": 7})), ApplyAction::Apply);
    }

    #[test]
    fn test_rollback_shares_apply_endpoint() {
        let action = ApplyAction::from_body(&json!({"action": "rollback"}));
        assert_eq!(action, ApplyAction::Rollback);
        assert_eq!(action.endpoint(), ApplyAction::Apply.endpoint());
    }
}
