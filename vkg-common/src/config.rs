//! Bootstrap configuration loading
//!
//! Only bootstrap concerns (logging) live in the TOML file. Analysis policy
//! (sample rate, silence threshold, duration bounds, fusion weights and
//! thresholds) is compiled in and never read from here, so every caller is
//! evaluated against the same rules.
//!
//! Config file resolution priority:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (`VKG_CONFIG`)
//! 3. Platform config directory (`<config_dir>/vakyaguard/config.toml`)
//! 4. Compiled defaults (fallback)

use crate::{Error, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "VKG_CONFIG";

/// Bootstrap configuration loaded from TOML file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TomlConfig {
    /// Logging configuration (optional)
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Log level or filter directive (trace, debug, info, warn, error, or `target=level` pairs)
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log file path (optional, logs to stderr if not specified)
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

impl TomlConfig {
    /// Parse configuration from TOML text
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| Error::TomlParse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load configuration from an explicit file
    ///
    /// A missing file is an error here; use [`ConfigResolver::load`] for the
    /// graceful-degradation path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content, path)
    }
}

/// Resolves which config file to read, then loads it
#[derive(Debug, Clone, Default)]
pub struct ConfigResolver {
    cli_path: Option<PathBuf>,
}

impl ConfigResolver {
    pub fn new(cli_path: Option<PathBuf>) -> Self {
        Self { cli_path }
    }

    /// Pick the config file path by priority, without touching the filesystem
    pub fn resolve_path(&self) -> Option<PathBuf> {
        if let Some(path) = &self.cli_path {
            return Some(path.clone());
        }

        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            if !path.trim().is_empty() {
                return Some(PathBuf::from(path));
            }
        }

        default_config_path()
    }

    /// Load the resolved config file
    ///
    /// Missing file → warning + compiled defaults. Unreadable or malformed
    /// file → error, since silently ignoring a broken config hides mistakes.
    pub fn load(&self) -> Result<TomlConfig> {
        let Some(path) = self.resolve_path() else {
            info!("No config directory available, using compiled defaults");
            return Ok(TomlConfig::default());
        };

        if !path.exists() {
            // The platform default is optional; an explicit path is not
            if self.cli_path.is_some() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            warn!(
                "Config file {} not found, using compiled defaults",
                path.display()
            );
            return Ok(TomlConfig::default());
        }

        info!("Loading config from {}", path.display());
        TomlConfig::from_file(&path)
    }
}

/// Platform default config file location
fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vakyaguard").join("config.toml"))
}
