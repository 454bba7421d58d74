use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "insight-server",
    about = "Insight Gateway - tenant-aware proxy to the Insight backend API",
    version = env!("CARGO_PKG_VERSION"),
    author,
    propagate_version = true
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(short, long, global = true, env = "INSIGHT_CONFIG", help = "Path to JSON config file")]
    pub config: Option<PathBuf>,

    #[arg(short, long, global = true, env = "RUST_LOG", default_value = "info")]
    pub log_level: String,

    #[command(flatten)]
    pub overrides: ServeOverrides,
}

/// Flags that override values from the config file.
#[derive(Args, Default, Clone)]
pub struct ServeOverrides {
    #[arg(long, global = true, env = "INSIGHT_HOST")]
    pub host: Option<String>,

    #[arg(short, long, global = true, env = "INSIGHT_PORT")]
    pub port: Option<u16>,

    #[arg(long, global = true, env = "INSIGHT_BACKEND_URL", help = "Backend API base URL")]
    pub backend_url: Option<String>,

    #[arg(long, global = true, env = "INSIGHT_STATIC_DIR", help = "Serve the built landing page")]
    pub static_dir: Option<String>,

    #[arg(long, global = true, env = "INSIGHT_REQUEST_TIMEOUT", help = "Outbound timeout in seconds")]
    pub request_timeout: Option<u64>,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Start the gateway (default if no command specified)")]
    Serve,

    #[command(about = "Bundle the landing page and write static-host fallbacks")]
    BuildLanding(LandingArgs),

    #[command(about = "Validate and print the effective configuration")]
    CheckConfig,
}

#[derive(Args, Default)]
pub struct LandingArgs {
    #[arg(long, help = "Entry file handed to the bundler")]
    pub entry: Option<String>,

    #[arg(long, help = "Output directory (wiped before the build)")]
    pub out_dir: Option<String>,

    #[arg(long, help = "Bundler executable")]
    pub bundler: Option<String>,
}
