//! Test helpers for insight-server unit tests.

use axum_test::TestServer;
use wiremock::MockServer;

use insight_types::GatewayConfig;

use crate::router::build_router;
use crate::state::AppState;

/// Gateway config pointing at `backend_url`.
pub fn test_config(backend_url: &str) -> GatewayConfig {
    GatewayConfig { backend_url: backend_url.to_string(), ..GatewayConfig::default() }
}

/// Full router wired to a mock backend.
pub fn test_server(backend: &MockServer) -> TestServer {
    test_server_for(&backend.uri())
}

pub fn test_server_for(backend_url: &str) -> TestServer {
    let state = AppState::new(test_config(backend_url)).expect("failed to create test AppState");
    TestServer::new(build_router(state)).expect("failed to start test server")
}

/// A local URL nothing is listening on.
pub fn unreachable_backend_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let port = listener.local_addr().expect("local addr").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
