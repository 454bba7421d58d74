//! Fixed JSON shapes returned to callers when a route fails.
//!
//! Each route owns one shape; clients key off the field names, so these
//! must not drift.

use serde::{Deserialize, Serialize};

/// `{ "error": ... }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorEnvelope {
    pub error: String,
}

impl ErrorEnvelope {
    pub fn new(error: impl Into<String>) -> Self {
        Self { error: error.into() }
    }
}

/// `{ "error": ..., "details": ... }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorDetailsEnvelope {
    pub error: String,
    pub details: String,
}

impl ErrorDetailsEnvelope {
    pub fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self { error: error.into(), details: details.into() }
    }
}

/// Health probe failure: `{ "status": "unhealthy", "error": ..., "details": ... }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthErrorEnvelope {
    pub status: String,
    pub error: String,
    pub details: String,
}

impl HealthErrorEnvelope {
    pub const UNHEALTHY: &'static str = "unhealthy";

    pub fn new(error: impl Into<String>, details: impl Into<String>) -> Self {
        Self { status: Self::UNHEALTHY.to_string(), error: error.into(), details: details.into() }
    }
}

/// Connection test failure: `{ "success": false, "message": ..., "details": null }`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ConnectionTestError {
    pub success: bool,
    pub message: String,
    pub details: Option<String>,
}

impl ConnectionTestError {
    pub fn new(message: impl Into<String>) -> Self {
        Self { success: false, message: message.into(), details: None }
    }
}
