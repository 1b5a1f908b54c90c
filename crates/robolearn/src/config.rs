//! Project configuration file support for robolearn.
//!
//! Loads configuration from `robolearn.toml` in the working directory.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Project-level configuration loaded from `robolearn.toml`
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Directory containing the `exports/` folder
    pub data_dir: Option<PathBuf>,
    /// Default tracing level (overridden by `--log-level` and `RUST_LOG`)
    pub log_level: Option<String>,
    /// Train/test split defaults
    #[serde(default)]
    pub split: SplitConfig,
}

/// Defaults for the `split` command
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct SplitConfig {
    /// Fraction of rows held out for testing
    pub test_size: Option<f64>,
    /// Seed for a reproducible partition
    pub seed: Option<u64>,
}

/// The config file name
pub const CONFIG_FILE_NAME: &str = "robolearn.toml";

impl ProjectConfig {
    /// Load configuration from the working directory.
    ///
    /// Returns:
    /// - `Ok(Some(config))` if file exists and parses successfully
    /// - `Ok(None)` if file does not exist
    /// - `Err(...)` if file exists but fails to parse (hard error)
    pub fn load(working_dir: &Path) -> Result<Option<Self>> {
        let config_path = working_dir.join(CONFIG_FILE_NAME);

        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;

        let config: ProjectConfig = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;

        Ok(Some(config))
    }

    /// Get the effective data directory.
    /// Priority: flag > config > default
    pub fn data_dir(&self, flag: Option<&Path>, default: &str) -> PathBuf {
        flag.map(Path::to_path_buf)
            .or_else(|| self.data_dir.clone())
            .unwrap_or_else(|| PathBuf::from(default))
    }

    /// Get the effective log level.
    /// Priority: flag > config > "info"
    pub fn log_level<'a>(&'a self, flag: Option<&'a str>) -> &'a str {
        flag.or(self.log_level.as_deref()).unwrap_or("info")
    }

    /// Get the effective test fraction.
    /// Priority: flag > [split].test_size > default
    pub fn test_size(&self, flag: Option<f64>, default: f64) -> f64 {
        flag.or(self.split.test_size).unwrap_or(default)
    }

    /// Get the effective split seed.
    /// Priority: flag > [split].seed > None
    pub fn seed(&self, flag: Option<u64>) -> Option<u64> {
        flag.or(self.split.seed)
    }
}
