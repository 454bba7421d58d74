use anyhow::{Context, Result};
use listenfd::ListenFd;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::{IpAddr, SocketAddr};
use tokio::net::TcpListener;
use tokio::signal;
use tracing::info;

use insight_types::GatewayConfig;

const LISTEN_BACKLOG: i32 = 1024;

/// Resolve the configured `host`/`port` pair into a bindable address.
pub fn gateway_bind_addr(config: &GatewayConfig) -> Result<SocketAddr> {
    let ip: IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid gateway host '{}'", config.host))?;
    Ok(SocketAddr::new(ip, config.port))
}

/// Listener for the gateway: an inherited systemd socket when one is passed,
/// otherwise a fresh `SO_REUSEPORT` socket on the configured address.
pub async fn create_listener(config: &GatewayConfig) -> Result<TcpListener> {
    let mut listenfd = ListenFd::from_env();

    if let Some(listener) = listenfd.take_tcp_listener(0)? {
        info!(backend = %config.backend_url, "Gateway adopted systemd socket (fd=3)");
        listener.set_nonblocking(true)?;
        return Ok(TcpListener::from_std(listener)?);
    }

    let addr = gateway_bind_addr(config)?;
    let domain = if addr.is_ipv4() { Domain::IPV4 } else { Domain::IPV6 };
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;

    socket.set_reuse_address(true)?;
    #[cfg(unix)]
    socket.set_reuse_port(true)?;
    socket.set_nonblocking(true)?;
    socket
        .bind(&addr.into())
        .with_context(|| format!("Gateway could not bind {addr}"))?;
    socket.listen(LISTEN_BACKLOG)?;

    info!(%addr, backend = %config.backend_url, "Gateway socket bound");

    Ok(TcpListener::from_std(socket.into())?)
}

#[allow(
    clippy::expect_used,
    reason = "Signal handlers are critical infrastructure, panic is appropriate on failure"
)]
pub async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c().await.expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    let signal_name = tokio::select! {
        () = ctrl_c => "Ctrl+C",
        () = terminate => "SIGTERM",
    };

    info!(signal = signal_name, "Gateway stopping, letting in-flight relays finish");
}
