//! Tenant identifier resolution.
//!
//! The tenant is read from a dedicated header first, then from a query
//! parameter. Whatever is found is written onto the outgoing header set under
//! the same header name.

use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use insight_types::GatewayConfig;

use crate::error::{GatewayError, GatewayResult};

/// Outcome of resolving a tenant for one inbound request.
#[derive(Debug, Clone, Default)]
pub struct ResolvedTenant {
    pub tenant_id: Option<String>,
    pub headers: HeaderMap,
}

#[derive(Debug, Clone)]
pub struct TenantResolver {
    header: HeaderName,
    query_param: String,
}

impl TenantResolver {
    pub fn new(header: &str, query_param: &str) -> GatewayResult<Self> {
        let header = HeaderName::from_bytes(header.as_bytes())
            .map_err(|e| GatewayError::Client(format!("Invalid tenant header '{header}': {e}")))?;
        Ok(Self { header, query_param: query_param.to_string() })
    }

    pub fn from_config(config: &GatewayConfig) -> GatewayResult<Self> {
        Self::new(&config.tenant_header, &config.tenant_query_param)
    }

    pub fn header_name(&self) -> &HeaderName {
        &self.header
    }

    /// Find the tenant for a request. The header takes priority over the query.
    pub fn resolve(&self, headers: &HeaderMap, query: Option<&str>) -> Option<String> {
        let from_header = headers
            .get(&self.header)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());
        if let Some(tenant) = from_header {
            return Some(tenant.to_string());
        }

        let query = query?;
        url::form_urlencoded::parse(query.as_bytes())
            .filter(|(key, _)| key == self.query_param.as_str())
            .map(|(_, value)| value.trim().to_string())
            .find(|v| !v.is_empty())
    }

    /// Resolve the tenant and merge it into `base`.
    ///
    /// Keys in `base` survive unless they collide with the tenant header, in
    /// which case the resolved tenant replaces them. Without a tenant, `base`
    /// is returned untouched, including any tenant header the caller set.
    pub fn outgoing_headers(
        &self,
        headers: &HeaderMap,
        query: Option<&str>,
        base: HeaderMap,
    ) -> ResolvedTenant {
        let mut merged = base;
        let tenant_id = self.resolve(headers, query);

        let tenant_id = match tenant_id.map(|t| (HeaderValue::from_str(&t), t)) {
            Some((Ok(value), tenant)) => {
                merged.insert(self.header.clone(), value);
                Some(tenant)
            },
            Some((Err(_), _)) => {
                tracing::debug!("Ignoring tenant identifier that is not a valid header value");
                None
            },
            None => None,
        };

        ResolvedTenant { tenant_id, headers: merged }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use reqwest::header::AUTHORIZATION;

    fn resolver() -> TenantResolver {
        TenantResolver::new("X-Tenant-ID", "tenant_id").unwrap()
    }

    fn headers_with_tenant(tenant: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert("x-tenant-id", HeaderValue::from_str(tenant).unwrap());
        headers
    }

    #[test]
    fn test_resolve_from_header() {
        let tenant = resolver().resolve(&headers_with_tenant("acme"), None);
        assert_eq!(tenant.as_deref(), Some("acme"));
    }

    #[test]
    fn test_resolve_from_query() {
        let tenant = resolver().resolve(&HeaderMap::new(), Some("foo=1&tenant_id=globex"));
        assert_eq!(tenant.as_deref(), Some("globex"));
    }

    #[test]
    fn test_query_value_is_percent_decoded() {
        let tenant = resolver().resolve(&HeaderMap::new(), Some("tenant_id=acme%20east"));
        assert_eq!(tenant.as_deref(), Some("acme east"));
    }

    #[test]
    fn test_header_wins_over_query() {
        let tenant = resolver().resolve(&headers_with_tenant("acme"), Some("tenant_id=globex"));
        assert_eq!(tenant.as_deref(), Some("acme"));
    }

    #[test]
    fn test_blank_header_falls_back_to_query() {
        let tenant = resolver().resolve(&headers_with_tenant("  "), Some("tenant_id=globex"));
        assert_eq!(tenant.as_deref(), Some("globex"));
    }

    #[test]
    fn test_first_non_empty_query_value_wins() {
        let resolver = resolver();
        let tenant = resolver.resolve(&HeaderMap::new(), Some("tenant_id=&tenant_id=acme"));
        assert_eq!(tenant.as_deref(), Some("acme"));
        let tenant = resolver.resolve(&HeaderMap::new(), Some("tenant_id=%20&tenant_id=globex&tenant_id=x"));
        assert_eq!(tenant.as_deref(), Some("globex"));
    }

    #[test]
    fn test_absent_tenant() {
        let resolver = resolver();
        assert!(resolver.resolve(&HeaderMap::new(), None).is_none());
        assert!(resolver.resolve(&HeaderMap::new(), Some("tenant_id=")).is_none());
        assert!(resolver.resolve(&HeaderMap::new(), Some("other=1")).is_none());
    }

    #[test]
    fn test_outgoing_headers_keep_base_keys() {
        let mut base = HeaderMap::new();
        base.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));

        let resolved = resolver().outgoing_headers(&headers_with_tenant("acme"), None, base);

        assert_eq!(resolved.tenant_id.as_deref(), Some("acme"));
        assert_eq!(resolved.headers.get(AUTHORIZATION).unwrap(), "Bearer abc");
        assert_eq!(resolved.headers.get("x-tenant-id").unwrap(), "acme");
    }

    #[test]
    fn test_resolved_tenant_replaces_colliding_base_key() {
        let mut base = HeaderMap::new();
        base.insert("X-Tenant-ID", HeaderValue::from_static("stale"));

        let resolved = resolver().outgoing_headers(&headers_with_tenant("acme"), None, base);

        assert_eq!(resolved.headers.get_all("x-tenant-id").iter().count(), 1);
        assert_eq!(resolved.headers.get("x-tenant-id").unwrap(), "acme");
    }

    #[test]
    fn test_no_tenant_leaves_base_untouched() {
        let mut base = HeaderMap::new();
        base.insert(AUTHORIZATION, HeaderValue::from_static("Bearer abc"));

        let resolved = resolver().outgoing_headers(&HeaderMap::new(), None, base.clone());

        assert!(resolved.tenant_id.is_none());
        assert_eq!(resolved.headers, base);
    }

    #[test]
    fn test_query_tenant_with_control_chars_is_dropped() {
        let resolved =
            resolver().outgoing_headers(&HeaderMap::new(), Some("tenant_id=a%0Ab"), HeaderMap::new());
        assert!(resolved.tenant_id.is_none());
        assert!(resolved.headers.is_empty());
    }

    #[test]
    fn test_custom_names() {
        let resolver = TenantResolver::new("X-Org", "org").unwrap();
        assert_eq!(resolver.header_name().as_str(), "x-org");
        assert_eq!(resolver.resolve(&HeaderMap::new(), Some("org=initech")).as_deref(), Some("initech"));
    }

    #[test]
    fn test_invalid_header_name() {
        assert!(TenantResolver::new("bad header", "tenant_id").is_err());
    }
}
