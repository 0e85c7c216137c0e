//! Configuration resolution for classify-catalog
//!
//! **Priority:** command line → environment (`CLASSIFY_*`) → TOML file →
//! compiled default. clap handles the first two tiers.

use crate::classify::DEFAULT_CLASSIFY_URL;
use clap::Parser;
use classify_common::config::{default_config_path, default_database_path, load_toml_config, TomlConfig};
use classify_common::{Error, Result};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_BIND_ADDRESS: &str = "127.0.0.1:8080";
pub const DEFAULT_LOOKUP_TIMEOUT_SECS: u64 = 30;

/// Command-line arguments
#[derive(Debug, Default, Parser)]
#[command(name = "classify-catalog", version, about = "Book catalog backed by a classification lookup service")]
pub struct Cli {
    /// TOML config file (default: <config dir>/classify/config.toml)
    #[arg(long, env = "CLASSIFY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address the HTTP server listens on
    #[arg(long, env = "CLASSIFY_BIND_ADDRESS")]
    pub bind_address: Option<String>,

    /// SQLite database file
    #[arg(long, env = "CLASSIFY_DATABASE_PATH")]
    pub database_path: Option<PathBuf>,

    /// Classification lookup endpoint
    #[arg(long, env = "CLASSIFY_URL")]
    pub classify_url: Option<String>,

    /// Timeout for each outbound lookup, in seconds
    #[arg(long, env = "CLASSIFY_LOOKUP_TIMEOUT_SECS")]
    pub lookup_timeout_secs: Option<u64>,

    /// Default log filter when RUST_LOG is unset
    #[arg(long, env = "CLASSIFY_LOG")]
    pub log_level: Option<String>,
}

/// Fully resolved service configuration
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
    pub bind_address: SocketAddr,
    pub database_path: PathBuf,
    pub classify_url: String,
    pub lookup_timeout: Duration,
    pub log_level: String,
}

impl CatalogConfig {
    /// Read the TOML file named by `cli` (or the default one) and resolve
    pub fn load(cli: &Cli) -> Result<Self> {
        let toml_config = match cli.config.clone().or_else(default_config_path) {
            Some(path) => load_toml_config(&path)?,
            None => TomlConfig::default(),
        };

        Self::resolve(cli, toml_config)
    }

    /// Merge command line/environment values over TOML values over defaults
    pub fn resolve(cli: &Cli, toml_config: TomlConfig) -> Result<Self> {
        let bind_address = cli
            .bind_address
            .clone()
            .or(toml_config.bind_address)
            .unwrap_or_else(|| DEFAULT_BIND_ADDRESS.to_string());
        let bind_address: SocketAddr = bind_address
            .parse()
            .map_err(|e| Error::Config(format!("Invalid bind address '{}': {}", bind_address, e)))?;

        let lookup_timeout_secs = cli
            .lookup_timeout_secs
            .or(toml_config.lookup_timeout_secs)
            .unwrap_or(DEFAULT_LOOKUP_TIMEOUT_SECS);
        if lookup_timeout_secs == 0 {
            return Err(Error::Config(
                "lookup_timeout_secs must be greater than zero".to_string(),
            ));
        }

        Ok(Self {
            bind_address,
            database_path: cli
                .database_path
                .clone()
                .or(toml_config.database_path)
                .unwrap_or_else(default_database_path),
            classify_url: cli
                .classify_url
                .clone()
                .or(toml_config.classify_url)
                .unwrap_or_else(|| DEFAULT_CLASSIFY_URL.to_string()),
            lookup_timeout: Duration::from_secs(lookup_timeout_secs),
            log_level: cli.log_level.clone().unwrap_or(toml_config.logging.level),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classify_common::config::LoggingConfig;

    #[test]
    fn test_defaults_when_nothing_configured() {
        let config = CatalogConfig::resolve(&Cli::default(), TomlConfig::default()).unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:8080".parse().unwrap());
        assert_eq!(config.classify_url, DEFAULT_CLASSIFY_URL);
        assert_eq!(config.lookup_timeout, Duration::from_secs(30));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.database_path, default_database_path());
    }

    #[test]
    fn test_toml_overrides_defaults() {
        let toml_config = TomlConfig {
            bind_address: Some("0.0.0.0:9000".to_string()),
            database_path: Some(PathBuf::from("/tmp/catalog.db")),
            classify_url: Some("http://localhost:7000/classify".to_string()),
            lookup_timeout_secs: Some(3),
            logging: LoggingConfig {
                level: "debug".to_string(),
            },
        };

        let config = CatalogConfig::resolve(&Cli::default(), toml_config).unwrap();

        assert_eq!(config.bind_address, "0.0.0.0:9000".parse().unwrap());
        assert_eq!(config.database_path, PathBuf::from("/tmp/catalog.db"));
        assert_eq!(config.classify_url, "http://localhost:7000/classify");
        assert_eq!(config.lookup_timeout, Duration::from_secs(3));
        assert_eq!(config.log_level, "debug");
    }

    #[test]
    fn test_command_line_overrides_toml() {
        let cli = Cli {
            bind_address: Some("127.0.0.1:9999".to_string()),
            lookup_timeout_secs: Some(7),
            ..Default::default()
        };
        let toml_config = TomlConfig {
            bind_address: Some("0.0.0.0:9000".to_string()),
            lookup_timeout_secs: Some(3),
            ..Default::default()
        };

        let config = CatalogConfig::resolve(&cli, toml_config).unwrap();

        assert_eq!(config.bind_address, "127.0.0.1:9999".parse().unwrap());
        assert_eq!(config.lookup_timeout, Duration::from_secs(7));
    }

    #[test]
    fn test_cli_flags_parse() {
        let cli = Cli::try_parse_from([
            "classify-catalog",
            "--bind-address",
            "127.0.0.1:1234",
            "--classify-url",
            "http://fixture/classify",
            "--lookup-timeout-secs",
            "9",
        ])
        .unwrap();

        assert_eq!(cli.bind_address.as_deref(), Some("127.0.0.1:1234"));
        assert_eq!(cli.classify_url.as_deref(), Some("http://fixture/classify"));
        assert_eq!(cli.lookup_timeout_secs, Some(9));
    }

    #[test]
    fn test_invalid_bind_address_rejected() {
        let cli = Cli {
            bind_address: Some("not-an-address".to_string()),
            ..Default::default()
        };

        let err = CatalogConfig::resolve(&cli, TomlConfig::default()).unwrap_err();
        assert!(err.to_string().contains("Invalid bind address"));
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let cli = Cli {
            lookup_timeout_secs: Some(0),
            ..Default::default()
        };

        assert!(CatalogConfig::resolve(&cli, TomlConfig::default()).is_err());
    }
}
