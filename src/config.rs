//! # Router Configuration Module
//!
//! Configuration for [`crate::router::RouteTable`], loaded from a YAML file
//! and/or environment variables.
//!
//! ## Environment Variables
//!
//! ### `BRRTR_BASE_PATH`
//!
//! Prefix prepended to every endpoint pattern when the table is built
//! (e.g. `/api/v1`). Default: empty.
//!
//! ### `BRRTR_REJECT_DUPLICATE_ROUTE_NAMES`
//!
//! When `true`, building a table in which two endpoints share a route name
//! fails instead of logging a warning. Default: `false`.
//!
//! ### `BRRTR_ROUTE_SUMMARY_LIMIT`
//!
//! Number of routes listed in the "Routing table loaded" log line.
//! Default: `10`.
//!
//! ## Example Configuration
//!
//! ```yaml
//! router:
//!   base_path: /api/v1
//!   reject_duplicate_names: true
//!   route_summary_limit: 25
//! ```
//!
//! ```rust,no_run
//! use brrtmap::config::RouterConfig;
//!
//! let config = RouterConfig::from_yaml_file("config/config.yaml")
//!     .expect("Failed to load router config")
//!     .apply_env_overrides();
//! println!("base path: {}", config.base_path);
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::env;
use std::path::Path;

/// Default number of routes included in the routing table summary log
pub const DEFAULT_ROUTE_SUMMARY_LIMIT: usize = 10;

fn default_route_summary_limit() -> usize {
    DEFAULT_ROUTE_SUMMARY_LIMIT
}

/// Route table configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RouterConfig {
    /// Base path prefix for all endpoints (e.g., `/api/v1`)
    pub base_path: String,
    /// Fail `build` on duplicate route names instead of warning
    pub reject_duplicate_names: bool,
    /// Routes listed in the table summary log line
    #[serde(default = "default_route_summary_limit")]
    pub route_summary_limit: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            base_path: String::new(),
            reject_duplicate_names: false,
            route_summary_limit: DEFAULT_ROUTE_SUMMARY_LIMIT,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct ConfigFile {
    #[serde(default)]
    router: RouterConfig,
}

impl RouterConfig {
    /// Load configuration from environment variables, falling back to defaults
    #[must_use]
    pub fn from_env() -> Self {
        Self::default().apply_env_overrides()
    }

    /// Parse the `router:` section of a YAML document
    ///
    /// A document without a `router:` section yields the defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let file: Option<ConfigFile> =
            serde_yaml::from_str(content).context("Failed to parse router config YAML")?;
        Ok(file.unwrap_or_default().router)
    }

    /// Load the `router:` section from a YAML file
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read router config {}", path.display()))?;
        Self::from_yaml_str(&content)
            .with_context(|| format!("Invalid router config {}", path.display()))
    }

    /// Layer environment variables over these values
    ///
    /// Unparseable values are ignored and the existing value is kept.
    #[must_use]
    pub fn apply_env_overrides(mut self) -> Self {
        if let Ok(base_path) = env::var("BRRTR_BASE_PATH") {
            self.base_path = base_path;
        }
        if let Some(reject) = env::var("BRRTR_REJECT_DUPLICATE_ROUTE_NAMES")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.reject_duplicate_names = reject;
        }
        if let Some(limit) = env::var("BRRTR_ROUTE_SUMMARY_LIMIT")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            self.route_summary_limit = limit;
        }
        self
    }
}
