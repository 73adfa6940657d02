//! Layered configuration
//!
//! Later layers win: built-in defaults, the YAML file, `.env` and process
//! environment, then command-line flags.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use minelab_sdk::EndpointTable;

use crate::cli::Args;
use crate::utils;

pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

pub const ENV_API_URL: &str = "MINELAB_API_URL";
pub const ENV_TIMEOUT_SECS: &str = "MINELAB_TIMEOUT_SECS";

/// Shape of `config.yaml`; every key is optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub api_url: Option<String>,
    pub timeout_secs: Option<u64>,
    /// Endpoint path overrides keyed by analysis slug
    pub endpoints: BTreeMap<String, String>,
    pub history_file: Option<PathBuf>,
    pub log_file: Option<PathBuf>,
}

/// Resolved configuration
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub api_url: String,
    pub timeout: Duration,
    pub endpoints: EndpointTable,
    pub history_file: PathBuf,
    pub log_file: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            endpoints: EndpointTable::default(),
            history_file: utils::history_file_path(),
            log_file: utils::log_file_path(),
        }
    }
}

impl Config {
    /// Resolve against the real environment, loading `.env` first
    pub fn load(args: &Args) -> Result<Self> {
        dotenv::dotenv().ok();
        Self::resolve(args, |key| std::env::var(key).ok())
    }

    /// Resolve with an explicit environment lookup
    pub fn resolve(args: &Args, env: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        match &args.config {
            Some(path) => config.apply_file(read_config_file(path)?)?,
            None => {
                if let Some(path) = utils::config_file_path().filter(|p| p.exists()) {
                    config.apply_file(read_config_file(&path)?)?;
                }
            }
        }

        if let Some(url) = env(ENV_API_URL).filter(|v| !v.trim().is_empty()) {
            config.api_url = url.trim().to_string();
        }
        if let Some(secs) = env(ENV_TIMEOUT_SECS).filter(|v| !v.trim().is_empty()) {
            let secs: u64 = secs.trim().parse().with_context(|| {
                format!("{} must be a whole number of seconds, got '{}'", ENV_TIMEOUT_SECS, secs)
            })?;
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(url) = &args.api_url {
            config.api_url = url.clone();
        }
        if let Some(secs) = args.timeout_secs {
            config.timeout = Duration::from_secs(secs);
        }
        if let Some(path) = &args.log_file {
            config.log_file = path.clone();
        }

        debug!(api_url = %config.api_url, timeout = ?config.timeout, "Configuration resolved");
        Ok(config)
    }

    pub fn apply_file(&mut self, file: FileConfig) -> Result<()> {
        if let Some(url) = file.api_url {
            self.api_url = url;
        }
        if let Some(secs) = file.timeout_secs {
            self.timeout = Duration::from_secs(secs);
        }
        for (slug, path) in &file.endpoints {
            let kind = slug.parse().context("Invalid key under 'endpoints'")?;
            self.endpoints
                .set(kind, path)
                .context("Invalid endpoint path")?;
        }
        if let Some(path) = file.history_file {
            self.history_file = path;
        }
        if let Some(path) = file.log_file {
            self.log_file = path;
        }
        Ok(())
    }
}

pub fn read_config_file(path: &Path) -> Result<FileConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;
    if content.trim().is_empty() {
        return Ok(FileConfig::default());
    }
    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file {}", path.display()))
}
