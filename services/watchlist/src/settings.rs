//! Service configuration
//!
//! Settings are layered: built-in defaults, then an optional
//! `watchlist.{toml,yaml,json}` file, then `WATCHLIST_*` environment
//! variables (`WATCHLIST_SERVER__PORT=8080`). Connection parameters for the
//! database are read separately by [`common::database::DatabaseConfig`].

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::env;

/// Top-level service settings
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub log: LogSettings,
    pub database: DatabaseSettings,
}

/// HTTP listener settings
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Logging settings
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// `tracing_subscriber::EnvFilter` directive, overridden by `RUST_LOG`
    pub filter: String,
}

/// Schema handling at startup
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    pub ensure_schema: bool,
}

impl ServerSettings {
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Settings {
    /// Load settings from the file named by `WATCHLIST_CONFIG` (default `watchlist`)
    pub fn load() -> Result<Self, ConfigError> {
        let path = env::var("WATCHLIST_CONFIG").unwrap_or_else(|_| "watchlist".to_string());
        Self::from_file(&path)
    }

    /// Load settings using `path` as the optional config file stem
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3001)?
            .set_default("log.filter", "info")?
            .set_default("database.ensure_schema", true)?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("WATCHLIST")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
