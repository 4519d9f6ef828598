//! Configuration management for the CLI

use std::path::PathBuf;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// CLI configuration, read from `~/.config/repset/config.json`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Kubeconfig to use when no flag or env override is given
    pub kubeconfig: Option<String>,
    /// Default output format
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from file, falling back to defaults if absent.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content =
            std::fs::read_to_string(&config_path).context("Failed to read config file")?;

        serde_json::from_str(&content).context("Failed to parse config file")
    }

    /// Get the configuration file path
    fn config_path() -> Result<PathBuf> {
        let home = dirs_next::home_dir().context("Could not determine home directory")?;
        Ok(home.join(".config").join("repset").join("config.json"))
    }
}

/// Resolve the kubeconfig path.
///
/// Resolution priority: the `--kubeconfig` flag, the `KUBECONFIG` env var,
/// the config file, then `~/.kube/config`.
pub fn kubeconfig_path(override_path: Option<&str>, config: &Config) -> Result<PathBuf> {
    if let Some(path) = override_path {
        return Ok(PathBuf::from(path));
    }

    if let Ok(path) = std::env::var("KUBECONFIG") {
        return Ok(PathBuf::from(path));
    }

    if let Some(path) = &config.kubeconfig {
        return Ok(PathBuf::from(path));
    }

    let home = dirs_next::home_dir().context("Could not determine home directory")?;
    Ok(home.join(".kube").join("config"))
}
