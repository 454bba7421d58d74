//! Backend forwarder.
//!
//! Every gateway route funnels through [`BackendForwarder::forward`]: one
//! outbound call per inbound request, no retry, response returned unread.
//! A non-2xx answer is still `Ok` here; routes that care call
//! [`require_success`].

use reqwest::header::HeaderMap;
use reqwest::{Client, Method, Response};
use serde_json::Value;
use url::Url;

use insight_types::GatewayConfig;

use crate::client_builder::build_http_client;
use crate::error::{GatewayError, GatewayResult};

const ERROR_BODY_PREVIEW_CHARS: usize = 512;

/// Per-call forwarding options.
#[derive(Debug, Clone)]
pub struct ForwardOptions {
    pub method: Method,
    /// Raw query string, appended as given
    pub query: Option<String>,
    /// JSON body, sent with `Content-Type: application/json`
    pub body: Option<Value>,
    pub headers: HeaderMap,
}

impl ForwardOptions {
    pub fn get() -> Self {
        Self { method: Method::GET, query: None, body: None, headers: HeaderMap::new() }
    }

    pub fn post_json(body: Value) -> Self {
        Self { method: Method::POST, query: None, body: Some(body), headers: HeaderMap::new() }
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = if query.is_empty() { None } else { Some(query) };
        self
    }

    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers = headers;
        self
    }
}

pub struct BackendForwarder {
    http_client: Client,
    base_url: Url,
}

impl BackendForwarder {
    /// Create a forwarder around a pre-built client.
    pub fn new(http_client: Client, base_url: &str) -> GatewayResult<Self> {
        let base_url = Url::parse(base_url.trim())
            .map_err(|e| GatewayError::InvalidUrl(format!("{base_url}: {e}")))?;
        if base_url.cannot_be_a_base() {
            return Err(GatewayError::InvalidUrl(format!("{base_url} cannot be a base URL")));
        }
        Ok(Self { http_client, base_url })
    }

    pub fn from_config(config: &GatewayConfig) -> GatewayResult<Self> {
        let client = build_http_client(config.request_timeout_secs)?;
        Self::new(client, &config.backend_url)
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Join `path` onto the base URL, keeping any path prefix the base carries.
    ///
    /// The query is appended as given, except for WHATWG URL normalization:
    /// characters outside the query set (`'`, space, `"`, `<`, `>`) are
    /// percent-encoded. Decoded values are unchanged.
    pub fn endpoint(&self, path: &str, query: Option<&str>) -> GatewayResult<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url =
            Url::parse(&joined).map_err(|e| GatewayError::InvalidUrl(format!("{joined}: {e}")))?;
        url.set_query(query.filter(|q| !q.is_empty()));
        Ok(url)
    }

    /// Send one request to `path` and hand back the raw response.
    pub async fn forward(&self, path: &str, options: ForwardOptions) -> GatewayResult<Response> {
        let url = self.endpoint(path, options.query.as_deref())?;

        tracing::debug!(
            method = %options.method,
            url = %url,
            has_body = options.body.is_some(),
            "Forwarding request to backend"
        );

        let mut request = self.http_client.request(options.method, url).headers(options.headers);
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        let response = request.send().await?;
        tracing::debug!(status = %response.status(), "Backend responded");
        Ok(response)
    }
}

/// Reject non-2xx responses before their body is parsed.
pub async fn require_success(response: Response) -> GatewayResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let body = match text.char_indices().nth(ERROR_BODY_PREVIEW_CHARS) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text,
    };
    Err(GatewayError::UpstreamStatus { status: status.as_u16(), body })
}

/// Consume the response body as JSON.
pub async fn read_json_body(response: Response) -> GatewayResult<Value> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|e| GatewayError::InvalidJson(e.to_string()))
}
