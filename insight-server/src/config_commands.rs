use anyhow::{Context, Result};
use std::path::Path;

use insight_types::GatewayConfig;

use crate::cli::{LandingArgs, ServeOverrides};

/// Defaults, then the config file, then CLI/env overrides. Validated.
pub fn load_effective_config(
    path: Option<&Path>,
    overrides: &ServeOverrides,
) -> Result<GatewayConfig> {
    let mut config = match path {
        Some(path) => GatewayConfig::load_from_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => GatewayConfig::default(),
    };

    apply_overrides(&mut config, overrides);

    config.validate_config().context("Invalid configuration")?;
    Ok(config)
}

pub fn apply_overrides(config: &mut GatewayConfig, overrides: &ServeOverrides) {
    if let Some(host) = &overrides.host {
        config.host.clone_from(host);
    }
    if let Some(port) = overrides.port {
        config.port = port;
    }
    if let Some(url) = &overrides.backend_url {
        config.backend_url = url.trim().trim_end_matches('/').to_string();
    }
    if let Some(dir) = &overrides.static_dir {
        config.static_dir = Some(dir.clone());
    }
    if let Some(secs) = overrides.request_timeout {
        config.request_timeout_secs = Some(secs);
    }
}

pub fn apply_landing_args(config: &mut GatewayConfig, args: &LandingArgs) {
    if let Some(entry) = &args.entry {
        config.landing.entry.clone_from(entry);
    }
    if let Some(out_dir) = &args.out_dir {
        config.landing.out_dir.clone_from(out_dir);
    }
    if let Some(bundler) = &args.bundler {
        config.landing.bundler.clone_from(bundler);
    }
}

pub fn show_config(config: &GatewayConfig) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
