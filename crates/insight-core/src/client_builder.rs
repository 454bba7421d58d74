use std::time::Duration;

use crate::error::{GatewayError, GatewayResult};

/// Build the shared HTTP client.
///
/// With `timeout_secs = None` no request timeout is set, so the platform and
/// backend decide how long a call may take.
pub fn build_http_client(timeout_secs: Option<u64>) -> GatewayResult<reqwest::Client> {
    let mut builder = reqwest::Client::builder().tcp_nodelay(true);

    if let Some(secs) = timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs.max(1)));
    }

    builder.build().map_err(|e| GatewayError::Client(format!("Failed to build HTTP client: {e}")))
}
