//! Landing page build.
//!
//! Wipes the output directory, runs the bundler against the landing entry,
//! then copies the produced page to each alias so static hosts that fall
//! back to `index.html` or `404.html` serve the landing page.

use anyhow::{bail, Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use insight_types::LandingConfig;

const ENTRY_PLACEHOLDER: &str = "{entry}";
const OUT_DIR_PLACEHOLDER: &str = "{out_dir}";

/// Run the full build. Returns every file written into the output directory.
pub fn build_landing(config: &LandingConfig) -> Result<Vec<PathBuf>> {
    let out_dir = Path::new(&config.out_dir);

    clean_output_dir(out_dir)?;
    run_bundler(config)?;

    let produced = out_dir.join(&config.output_name);
    if !produced.is_file() {
        bail!("Bundler finished but {} was not produced", produced.display());
    }

    let mut written = vec![produced.clone()];
    written.extend(duplicate_output(&produced, &config.aliases)?);

    tracing::info!("Landing build complete: {} file(s) in {}", written.len(), out_dir.display());
    Ok(written)
}

/// Remove any previous build and recreate an empty output directory.
pub fn clean_output_dir(out_dir: &Path) -> Result<()> {
    if out_dir.exists() {
        fs::remove_dir_all(out_dir)
            .with_context(|| format!("Failed to remove {}", out_dir.display()))?;
    }
    fs::create_dir_all(out_dir).with_context(|| format!("Failed to create {}", out_dir.display()))
}

pub fn expand_args(config: &LandingConfig) -> Vec<String> {
    config
        .bundler_args
        .iter()
        .map(|arg| {
            arg.replace(ENTRY_PLACEHOLDER, &config.entry)
                .replace(OUT_DIR_PLACEHOLDER, &config.out_dir)
        })
        .collect()
}

fn run_bundler(config: &LandingConfig) -> Result<()> {
    let args = expand_args(config);
    tracing::info!("Bundling {} with {} {}", config.entry, config.bundler, args.join(" "));

    let status = Command::new(&config.bundler)
        .args(&args)
        .status()
        .with_context(|| format!("Failed to run bundler '{}'", config.bundler))?;

    if !status.success() {
        bail!("Bundler exited with code {:?}", status.code());
    }
    Ok(())
}

/// Copy `produced` next to itself under each alias name.
pub fn duplicate_output(produced: &Path, aliases: &[String]) -> Result<Vec<PathBuf>> {
    let dir = produced.parent().unwrap_or_else(|| Path::new("."));
    let mut copies = Vec::with_capacity(aliases.len());

    for alias in aliases {
        let target = dir.join(alias);
        if target == produced {
            continue;
        }
        fs::copy(produced, &target).with_context(|| {
            format!("Failed to copy {} to {}", produced.display(), target.display())
        })?;
        copies.push(target);
    }

    Ok(copies)
}
