//! # Insight Types
//!
//! Configuration models and response envelopes for Insight Gateway.
//!
//! - **`error`** - Typed configuration errors
//! - **`models`** - Gateway and landing build configuration, error envelopes
//!
//! ## Architecture Role
//!
//! `insight-types` sits at the bottom of the dependency graph:
//!
//! ```text
//!        insight-types (this crate)
//!                │
//!                ▼
//!          insight-core
//!                │
//!                ▼
//!         insight-server
//! ```

pub mod error;
pub mod models;

pub use error::ConfigError;
pub use models::{
    ConnectionTestError, ErrorDetailsEnvelope, ErrorEnvelope, GatewayConfig, HealthErrorEnvelope,
    LandingConfig,
};
