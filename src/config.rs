//! Runtime settings
//!
//! Resolved from CLI flags, then environment (through clap), then the JSON
//! config file, then defaults.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;
use tracing::debug;

use crate::cli::GlobalArgs;
use crate::search::IndexBackend;
use crate::views::DisplayOptions;

pub const DEFAULT_DATA: &str = ".";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Contents of `config.json`; every key is optional
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct FileConfig {
    pub data: Option<String>,
    pub backend: Option<IndexBackend>,
    pub timeout_secs: Option<u64>,
    pub show_property_info: Option<bool>,
    pub show_changes: Option<bool>,
}

/// Path of the default configuration file
pub fn config_path() -> Result<PathBuf> {
    let config_dir = dirs::config_dir().context("Cannot determine config directory")?;
    Ok(config_dir.join("exhibit").join("config.json"))
}

/// Read a config file; a missing file yields the empty config
pub fn load_config(path: &Path) -> Result<FileConfig> {
    if !path.exists() {
        debug!("No config file at {}", path.display());
        return Ok(FileConfig::default());
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file {}", path.display()))?;

    let config: FileConfig = serde_json::from_str(&data)
        .with_context(|| format!("Failed to parse config file {}", path.display()))?;

    Ok(config)
}

/// Effective settings for one run
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub data: String,
    pub backend: IndexBackend,
    pub timeout: Duration,
    pub display: DisplayOptions,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data: DEFAULT_DATA.to_string(),
            backend: IndexBackend::default(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            display: DisplayOptions::default(),
        }
    }
}

impl Settings {
    /// Load the config file named by `--config` (which must exist) or the default one
    pub fn resolve(args: &GlobalArgs) -> Result<Self> {
        let file = match &args.config {
            Some(path) => {
                if !path.exists() {
                    anyhow::bail!("Config file not found: {}", path.display());
                }
                load_config(path)?
            }
            None => match config_path() {
                Ok(path) => load_config(&path)?,
                Err(e) => {
                    debug!("Skipping config file: {}", e);
                    FileConfig::default()
                }
            },
        };
        Ok(Self::merge(args, file))
    }

    /// Flags win over the file, the file over defaults
    pub fn merge(args: &GlobalArgs, file: FileConfig) -> Self {
        let defaults = Settings::default();
        Self {
            data: args.data.clone().or(file.data).unwrap_or(defaults.data),
            backend: args.backend.or(file.backend).unwrap_or(defaults.backend),
            timeout: args
                .timeout
                .or(file.timeout_secs)
                .map(Duration::from_secs)
                .unwrap_or(defaults.timeout),
            display: DisplayOptions {
                show_property_info: args.show_property_info || file.show_property_info.unwrap_or(false),
                show_changes: args.show_changes || file.show_changes.unwrap_or(false),
            },
        }
    }
}
