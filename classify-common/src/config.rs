//! Configuration loading and default path resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable
//! 3. TOML config file
//! 4. OS-dependent compiled default (fallback)
//!
//! Steps 1 and 2 belong to each service binary; this module owns the TOML
//! file and the compiled defaults.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::info;

/// Directory name used under the platform config and data directories
pub const APP_DIR: &str = "classify";

/// Logging section of the TOML config
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct LoggingConfig {
    /// Default tracing filter directive (e.g., "info", "classify_catalog=debug")
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Contents of `config.toml`. Every field is optional; absent fields fall
/// through to compiled defaults.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct TomlConfig {
    /// Socket address the HTTP server binds to
    pub bind_address: Option<String>,
    /// SQLite database file
    pub database_path: Option<PathBuf>,
    /// Classification lookup endpoint
    pub classify_url: Option<String>,
    /// Timeout applied to each outbound lookup, in seconds
    pub lookup_timeout_secs: Option<u64>,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Default location of the TOML config file for the platform
///
/// Linux: `~/.config/classify/config.toml`, macOS: `~/Library/Application Support/classify/config.toml`,
/// Windows: `%APPDATA%\classify\config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
}

/// Default SQLite database location for the platform
pub fn default_database_path() -> PathBuf {
    dirs::data_local_dir()
        .map(|d| d.join(APP_DIR))
        .unwrap_or_else(|| PathBuf::from("./classify_data"))
        .join("catalog.db")
}

/// Load a TOML config file
///
/// A missing file yields the default (empty) config so the service can start
/// with zero configuration. A file that exists but cannot be read or parsed
/// is an error.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        info!("Config file not found, using defaults: {}", path.display());
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    info!("Loaded config file: {}", path.display());
    Ok(config)
}

