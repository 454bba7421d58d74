//! Shared data structures for Insight Gateway.

mod config;
mod envelope;
mod landing;

pub use config::{
    GatewayConfig, DEFAULT_BACKEND_URL, DEFAULT_PORT, DEFAULT_TENANT_HEADER,
    DEFAULT_TENANT_QUERY_PARAM,
};
pub use envelope::{ConnectionTestError, ErrorDetailsEnvelope, ErrorEnvelope, HealthErrorEnvelope};
pub use landing::LandingConfig;
