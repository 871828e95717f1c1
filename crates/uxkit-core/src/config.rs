//! Configuration management for uxkit.
//!
//! Settings are resolved in this priority order:
//! 1. Environment variables (`UXKIT_KITS_DIR`, `UXKIT_GITHUB_URL`,
//!    `UXKIT_GITHUB_TOKEN`, `UXKIT_LOG`)
//! 2. Values loaded from `~/.uxkit/config.yml`
//! 3. Default values
//!
//! ## Example
//!
//! ```no_run
//! use uxkit_core::config::ToolkitConfig;
//!
//! let config = ToolkitConfig::load()?;
//! println!("kits live in {}", config.kits_dir().display());
//! # Ok::<(), uxkit_types::ToolkitError>(())
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use uxkit_types::{LogLevel, Result, ToolkitError};

use crate::util::fs::expand_path;

/// Environment variable overriding the local kits directory.
pub const ENV_KITS_DIR: &str = "UXKIT_KITS_DIR";
/// Environment variable overriding the GitHub archive base URL.
pub const ENV_GITHUB_URL: &str = "UXKIT_GITHUB_URL";
/// Environment variable providing a GitHub token.
pub const ENV_GITHUB_TOKEN: &str = "UXKIT_GITHUB_TOKEN";
/// Environment variable overriding the log level.
pub const ENV_LOG: &str = "UXKIT_LOG";

/// GitHub archive download settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GithubSettings {
    /// Base URL archives are downloaded from
    #[serde(default = "default_archive_url")]
    pub archive_url: String,

    /// Personal access token (optional, for private repositories and rate limits)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
}

fn default_archive_url() -> String {
    "https://github.com".to_string()
}

impl Default for GithubSettings {
    fn default() -> Self {
        Self {
            archive_url: default_archive_url(),
            token: None,
        }
    }
}

/// User-wide uxkit configuration (~/.uxkit/config.yml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolkitConfig {
    /// Directory holding local kits, one subdirectory per kit
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kits_dir: Option<PathBuf>,

    /// GitHub registry settings
    #[serde(default)]
    pub github: GithubSettings,

    /// Default log level
    #[serde(default)]
    pub log_level: LogLevel,
}

impl Default for ToolkitConfig {
    fn default() -> Self {
        Self {
            kits_dir: None,
            github: GithubSettings::default(),
            log_level: LogLevel::default(),
        }
    }
}

impl ToolkitConfig {
    /// Load configuration from the default location, then apply
    /// environment overrides.
    pub fn load() -> Result<Self> {
        let mut config = match Self::default_path() {
            Some(path) => Self::load_from(path)?,
            None => Self::default(),
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    /// Load configuration from a specific path.
    ///
    /// A missing file yields the default configuration.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!("No config file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)
            .map_err(|e| ToolkitError::Config(format!("Failed to read config file: {}", e)))?;

        if content.trim().is_empty() {
            debug!("Config file {:?} is empty, using defaults", path);
            return Ok(Self::default());
        }

        debug!("Loading config from {:?}", path);

        serde_yaml::from_str(&content)
            .map_err(|e| ToolkitError::Config(format!("Failed to parse config: {}", e)))
    }

    /// Apply overrides from a variable lookup (normally the process environment).
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(dir) = lookup(ENV_KITS_DIR).filter(|v| !v.is_empty()) {
            self.kits_dir = Some(PathBuf::from(dir));
        }
        if let Some(url) = lookup(ENV_GITHUB_URL).filter(|v| !v.is_empty()) {
            self.github.archive_url = url;
        }
        if let Some(token) = lookup(ENV_GITHUB_TOKEN).filter(|v| !v.is_empty()) {
            self.github.token = Some(token);
        }
        if let Some(level) = lookup(ENV_LOG).and_then(|v| v.parse().ok()) {
            self.log_level = level;
        }
    }

    /// Save configuration to a file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let yaml = serde_yaml::to_string(self)
            .map_err(|e| ToolkitError::Config(format!("Failed to serialize config: {}", e)))?;

        fs::write(path, yaml)
            .map_err(|e| ToolkitError::Config(format!("Failed to write config file: {}", e)))
    }

    /// The local kits directory, with `~` expanded.
    ///
    /// Defaults to `~/.uxkit/kits`.
    pub fn kits_dir(&self) -> PathBuf {
        match &self.kits_dir {
            Some(dir) => expand_path(dir),
            None => Self::home_dir().join("kits"),
        }
    }

    /// Get the default path for the configuration file.
    pub fn default_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".uxkit").join("config.yml"))
    }

    fn home_dir() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".uxkit")
    }
}
