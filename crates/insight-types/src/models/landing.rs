//! Landing page build configuration.

use serde::{Deserialize, Serialize};
use validator::Validate;

/// How to bundle the landing entry and where the output goes.
///
/// `bundler_args` may contain `{entry}` and `{out_dir}` placeholders; they are
/// substituted before the bundler is spawned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Validate)]
pub struct LandingConfig {
    /// Bundler executable
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_bundler")]
    pub bundler: String,
    /// Bundler argument template
    #[serde(default = "default_bundler_args")]
    pub bundler_args: Vec<String>,
    /// Entry file handed to the bundler
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_entry")]
    pub entry: String,
    /// Output directory, wiped before every build
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_out_dir")]
    pub out_dir: String,
    /// File the bundler produces inside `out_dir`
    #[validate(length(min = 1_u64))]
    #[serde(default = "default_output_name")]
    pub output_name: String,
    /// Extra copies of the output for static-host routing
    #[serde(default = "default_aliases")]
    pub aliases: Vec<String>,
}

impl Default for LandingConfig {
    fn default() -> Self {
        Self {
            bundler: default_bundler(),
            bundler_args: default_bundler_args(),
            entry: default_entry(),
            out_dir: default_out_dir(),
            output_name: default_output_name(),
            aliases: default_aliases(),
        }
    }
}

fn default_bundler() -> String {
    "npx".to_string()
}

fn default_bundler_args() -> Vec<String> {
    ["parcel", "build", "{entry}", "--dist-dir", "{out_dir}", "--no-source-maps"]
        .iter()
        .map(ToString::to_string)
        .collect()
}

fn default_entry() -> String {
    "frontend/landing.html".to_string()
}

fn default_out_dir() -> String {
    "dist".to_string()
}

fn default_output_name() -> String {
    "landing.html".to_string()
}

fn default_aliases() -> Vec<String> {
    vec!["index.html".to_string(), "404.html".to_string()]
}
