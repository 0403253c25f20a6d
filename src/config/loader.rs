// src/config/loader.rs

//! # Configuration Loader
//!
//! Resolves which TOML file to read (explicit path, then `telemetry.toml` in
//! the working directory, then built-in defaults) and validates the result.

use crate::config::model::{Config, ConfigError};
use std::{fs, path::Path};

/// File looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "telemetry.toml";

/// Load the configuration.
///
/// An explicit `path` must exist. Without one, `telemetry.toml` is read if
/// present and defaults are used otherwise.
pub fn load(path: Option<&Path>) -> Result<Config, ConfigError> {
    match path {
        Some(p) => load_file(p),
        None => {
            let fallback = Path::new(DEFAULT_CONFIG_FILE);
            if fallback.is_file() {
                load_file(fallback)
            } else {
                Ok(Config::default())
            }
        }
    }
}

/// Read and parse one TOML file.
pub fn load_file(path: &Path) -> Result<Config, ConfigError> {
    let txt = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse(&txt)
}

/// Parse TOML text and check the values serde cannot.
pub fn parse(txt: &str) -> Result<Config, ConfigError> {
    let cfg: Config = toml::from_str(txt)?;
    cfg.logging.level_filter()?;
    if cfg.mock.devices.is_empty() || cfg.mock.devices.iter().any(|d| d.trim().is_empty()) {
        return Err(ConfigError::NoMockDevices);
    }
    Ok(cfg)
}
