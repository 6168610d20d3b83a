use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Process-wide scraping configuration. The web server and the CLI both
/// fall back to the defaults when no config file is given.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScraperConfig {
    /// Request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Fixed User-Agent override. When unset, one is picked from the
    /// built-in browser pool per request.
    #[serde(default)]
    pub user_agent: Option<String>,
}

fn default_timeout_secs() -> u64 {
    20
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: None,
        }
    }
}

impl ScraperConfig {
    /// Load configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref()).with_context(|| {
            format!("Failed to read config file '{}'", path.as_ref().display())
        })?;
        toml::from_str(&raw).with_context(|| {
            format!("Failed to parse config file '{}'", path.as_ref().display())
        })
    }

    /// Load from a file when a path is given, otherwise use defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: Option<P>) -> Result<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
