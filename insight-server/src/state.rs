//! Application State
//!
//! Read-only after startup: the effective config, the shared forwarder and
//! the tenant resolver.

use anyhow::Result;
use axum::http::HeaderMap;
use std::sync::Arc;

use insight_core::{BackendForwarder, TenantResolver};
use insight_types::GatewayConfig;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub(crate) inner: Arc<AppStateInner>,
}

pub struct AppStateInner {
    pub config: GatewayConfig,
    pub forwarder: BackendForwarder,
    pub tenants: TenantResolver,
}

impl AppState {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        let forwarder = BackendForwarder::from_config(&config)?;
        let tenants = TenantResolver::from_config(&config)?;

        tracing::info!("Forwarding to backend at {}", forwarder.base_url());

        Ok(Self { inner: Arc::new(AppStateInner { config, forwarder, tenants }) })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.inner.config
    }

    pub fn forwarder(&self) -> &BackendForwarder {
        &self.inner.forwarder
    }

    /// Outgoing headers for a request: `base` plus the resolved tenant.
    pub fn tenant_headers(&self, headers: &HeaderMap, query: Option<&str>, base: HeaderMap) -> HeaderMap {
        let resolved = self.inner.tenants.outgoing_headers(headers, query, base);
        if resolved.tenant_id.is_none() {
            tracing::trace!("No tenant on request");
        }
        resolved.headers
    }
}
