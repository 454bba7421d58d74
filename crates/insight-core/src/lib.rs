//! # Insight Core
//!
//! Request plumbing shared by every gateway route.
//!
//! ```text
//! insight-core/src/
//! ├── tenant.rs          # Tenant identifier resolution + header merge
//! ├── forwarder.rs       # Single-shot relay to the backend API
//! ├── client_builder.rs  # reqwest client construction
//! └── error.rs           # GatewayError
//! ```

pub mod client_builder;
pub mod error;
pub mod forwarder;
pub mod tenant;

pub use error::{GatewayError, GatewayResult};
pub use forwarder::{read_json_body, require_success, BackendForwarder, ForwardOptions};
pub use tenant::{ResolvedTenant, TenantResolver};
