//! Gateway configuration.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use super::landing::LandingConfig;
use crate::error::ConfigError;

/// Backend used when nothing else is configured.
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
pub const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_TENANT_HEADER: &str = "X-Tenant-ID";
pub const DEFAULT_TENANT_QUERY_PARAM: &str = "tenant_id";

/// Process-wide gateway configuration, fixed at startup.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct GatewayConfig {
    /// Base URL of the backend API every route forwards to
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_backend_url")]
    pub backend_url: String,
    /// Header carrying the tenant identifier, inbound and outbound
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_tenant_header")]
    pub tenant_header: String,
    /// Query parameter consulted when the tenant header is absent
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_tenant_query_param")]
    pub tenant_query_param: String,
    /// Address to bind
    #[serde(default = "default_host")]
    pub host: String,
    /// Port to listen on
    #[validate(range(min = 1_u16))]
    #[serde(default = "default_port")]
    pub port: u16,
    /// Outbound request timeout; `None` keeps the client default
    #[validate(range(min = 1_u64, max = 3600_u64))]
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
    /// Directory with the built landing page, served as SPA fallback
    #[serde(default)]
    pub static_dir: Option<String>,
    /// Origins allowed by CORS
    #[serde(default = "default_allowed_origins")]
    pub allowed_origins: Vec<String>,
    /// Landing page build step
    #[serde(default)]
    #[validate(nested)]
    pub landing: LandingConfig,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            tenant_header: default_tenant_header(),
            tenant_query_param: default_tenant_query_param(),
            host: default_host(),
            port: default_port(),
            request_timeout_secs: None,
            static_dir: None,
            allowed_origins: default_allowed_origins(),
            landing: LandingConfig::default(),
        }
    }
}

impl GatewayConfig {
    /// Load a JSON config file. Missing fields take their defaults.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound { path: path.display().to_string() });
        }
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::from_io_error(&e))?;
        serde_json::from_str(&content).map_err(|e| ConfigError::from_json_error(&e))
    }

    /// Run field validators, then the checks `validator` cannot express.
    pub fn validate_config(&self) -> Result<(), ConfigError> {
        self.validate().map_err(|e| ConfigError::from_validation_errors(&e))?;

        let parsed = url::Url::parse(&self.backend_url).map_err(|e| {
            ConfigError::ValidationError { field: "backend_url".to_string(), message: e.to_string() }
        })?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(ConfigError::ValidationError {
                field: "backend_url".to_string(),
                message: format!("unsupported scheme '{}'", parsed.scheme()),
            });
        }

        if !is_token(&self.tenant_header) {
            return Err(ConfigError::ValidationError {
                field: "tenant_header".to_string(),
                message: format!("'{}' is not a valid header name", self.tenant_header),
            });
        }

        Ok(())
    }

    /// Get the full bind socket address.
    pub fn get_socket_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn is_token(name: &str) -> bool {
    !name.is_empty() && name.bytes().all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

fn default_backend_url() -> String {
    DEFAULT_BACKEND_URL.to_string()
}

fn default_tenant_header() -> String {
    DEFAULT_TENANT_HEADER.to_string()
}

fn default_tenant_query_param() -> String {
    DEFAULT_TENANT_QUERY_PARAM.to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

const fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_allowed_origins() -> Vec<String> {
    vec![format!("http://localhost:{DEFAULT_PORT}"), format!("http://127.0.0.1:{DEFAULT_PORT}")]
}
