//! Insight Gateway Server
//!
//! A small HTTP service between the Insight web frontend and the backend API:
//! - Proxies `/api/*` to the backend, adding the tenant header
//! - Serves the built landing page as static files (optional)
//! - Builds that landing page (`build-landing`)
//!
//! Access via: http://localhost:3000

use anyhow::Result;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod api;
mod cli;
mod config_commands;
mod landing;
mod router;
mod server_utils;
mod state;

#[cfg(test)]
mod test_helpers;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = EnvFilter::try_new(&cli.log_level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut config = config_commands::load_effective_config(cli.config.as_deref(), &cli.overrides)?;

    match cli.command {
        None | Some(Commands::Serve) => serve(config).await,
        Some(Commands::BuildLanding(args)) => {
            config_commands::apply_landing_args(&mut config, &args);
            let written = landing::build_landing(&config.landing)?;
            for path in written {
                println!("{}", path.display());
            }
            Ok(())
        },
        Some(Commands::CheckConfig) => config_commands::show_config(&config),
    }
}

async fn serve(config: insight_types::GatewayConfig) -> Result<()> {
    info!("Insight Gateway starting on {}...", config.get_socket_addr());

    let listener = server_utils::create_listener(&config).await?;
    let state = AppState::new(config)?;
    let app = router::build_router(state);

    info!("Insight Gateway listening on http://{}", listener.local_addr()?);

    axum::serve(listener, app).with_graceful_shutdown(server_utils::shutdown_signal()).await?;

    info!("Insight Gateway stopped");
    Ok(())
}
