// src/config/model.rs

use log::LevelFilter;
use serde::Deserialize;
use std::path::PathBuf;
use thiserror::Error;

pub const DEFAULT_DB_PATH: &str = "data/network_telemetry.db";
pub const DEFAULT_EXPORT_PATH: &str = "data/latest_telemetry.json";
pub const DEFAULT_LOG_FILE: &str = "logs/telemetry.log";
pub const DEFAULT_HIGH_LATENCY_MS: f64 = 100.0;
pub const DEFAULT_HIGH_LATENCY_LIMIT: u32 = 10;

/// Sample device names used for mock records.
pub const SAMPLE_DEVICES: [&str; 5] = [
    "router-nyc-01",
    "switch-lax-02",
    "fw-ams-01",
    "ap-sfo-03",
    "core-router-01",
];

/// Top-level runtime config, mirror of the whole TOML file.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub logging:  LoggingConfig,
    pub database: DatabaseConfig,
    pub export:   ExportConfig,
    pub query:    QueryConfig,
    pub mock:     MockConfig,
}

/// Mirror of the `[logging]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub enable: bool,
    pub file:   PathBuf,
    pub level:  String,
    /// Also write log lines to stderr.
    pub echo:   bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable: true,
            file:   PathBuf::from(DEFAULT_LOG_FILE),
            level:  "INFO".into(),
            echo:   false,
        }
    }
}

impl LoggingConfig {
    pub fn level_filter(&self) -> Result<LevelFilter, ConfigError> {
        match self.level.to_uppercase().as_str() {
            "OFF"   => Ok(LevelFilter::Off),
            "ERROR" => Ok(LevelFilter::Error),
            "WARN"  => Ok(LevelFilter::Warn),
            "INFO"  => Ok(LevelFilter::Info),
            "DEBUG" => Ok(LevelFilter::Debug),
            "TRACE" => Ok(LevelFilter::Trace),
            _       => Err(ConfigError::InvalidLevel(self.level.clone())),
        }
    }
}

/// Mirror of the `[database]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DatabaseConfig {
    pub path:            PathBuf,
    pub busy_timeout_ms: u64,
    pub journal_mode:    String,
    pub synchronous:     String,
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path:            PathBuf::from(DEFAULT_DB_PATH),
            busy_timeout_ms: 1_000,
            journal_mode:    "DELETE".into(),
            synchronous:     "NORMAL".into(),
        }
    }
}

/// Mirror of the `[export]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub path: PathBuf,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self { path: PathBuf::from(DEFAULT_EXPORT_PATH) }
    }
}

/// Mirror of the `[query]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct QueryConfig {
    pub high_latency_threshold: f64,
    pub high_latency_limit:     u32,
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            high_latency_threshold: DEFAULT_HIGH_LATENCY_MS,
            high_latency_limit:     DEFAULT_HIGH_LATENCY_LIMIT,
        }
    }
}

/// Mirror of the `[mock]` table
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MockConfig {
    pub devices: Vec<String>,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self { devices: SAMPLE_DEVICES.iter().map(|d| d.to_string()).collect() }
    }
}

/// All the ways config loading can go wrong
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid log level '{0}'")]
    InvalidLevel(String),

    #[error("mock device list must contain at least one non-empty name")]
    NoMockDevices,

    #[error("I/O error reading {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}
