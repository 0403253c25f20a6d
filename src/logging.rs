// src/logging.rs

//! # Operation log
//!
//! A `fern` dispatch turned into a plain `log::Log` value instead of being
//! installed as the global logger. The store owns an [`EventLog`] and writes
//! to it through [`store_log!`](crate::store_log).

use crate::config::model::LoggingConfig;
use chrono::Local;
use fern::Dispatch;
use log::{Level, LevelFilter, Log, Record};
use std::{fmt, fs, process, sync::Arc};

/// Handle to an append-only operation log.
#[derive(Clone)]
pub struct EventLog {
    inner: Arc<dyn Log>,
    level: LevelFilter,
}

impl fmt::Debug for EventLog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventLog").field("level", &self.level).finish()
    }
}

impl EventLog {
    /// Wrap an arbitrary logger.
    pub fn new(inner: Arc<dyn Log>, level: LevelFilter) -> Self {
        Self { inner, level }
    }

    /// A log that drops every record.
    pub fn disabled() -> Self {
        let (_, inner) = Dispatch::new().level(LevelFilter::Off).into_log();
        Self::new(Arc::from(inner), LevelFilter::Off)
    }

    /// Build the log described by `[logging]`: a file sink (parent directory
    /// created on demand) and optionally stderr.
    pub fn from_config(cfg: &LoggingConfig) -> Result<Self, fern::InitError> {
        if !cfg.enable {
            return Ok(Self::disabled());
        }
        let level = cfg.level_filter().unwrap_or(LevelFilter::Info);

        let mut dispatch = Dispatch::new()
            .format(|out, msg, record| {
                out.finish(format_args!(
                    "[{}][{:5}][{}][pid={}] {}",
                    Local::now().to_rfc3339(),
                    record.level(),
                    record.target(),
                    process::id(),
                    msg
                ))
            })
            .level(level);

        if let Some(parent) = cfg.file.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        dispatch = dispatch.chain(fern::log_file(&cfg.file)?);

        if cfg.echo {
            dispatch = dispatch.chain(std::io::stderr());
        }

        let (level, inner) = dispatch.into_log();
        Ok(Self::new(Arc::from(inner), level))
    }

    pub fn enabled(&self, level: Level) -> bool {
        level <= self.level
    }

    /// Emit one record. Prefer the `store_log!` macro.
    pub fn record(&self, level: Level, target: &str, args: fmt::Arguments<'_>) {
        if !self.enabled(level) {
            return;
        }
        self.inner.log(
            &Record::builder()
                .level(level)
                .target(target)
                .args(args)
                .build(),
        );
    }

    pub fn flush(&self) {
        self.inner.flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_log_appends_formatted_lines() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = LoggingConfig {
            enable: true,
            file: dir.path().join("nested").join("telemetry.log"),
            level: "info".into(),
            echo: false,
        };

        let log = EventLog::from_config(&cfg).unwrap();
        log.record(Level::Info, "netlat::test", format_args!("first {}", 1));
        log.record(Level::Debug, "netlat::test", format_args!("filtered"));
        log.flush();
        drop(log);

        let again = EventLog::from_config(&cfg).unwrap();
        again.record(Level::Error, "netlat::test", format_args!("second"));
        again.flush();

        let text = fs::read_to_string(&cfg.file).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2, "unexpected log contents: {text}");
        assert!(lines[0].contains("[INFO ][netlat::test]"));
        assert!(lines[0].ends_with("first 1"));
        assert!(lines[1].contains("[ERROR][netlat::test]"));
        assert!(!text.contains("filtered"));
    }

    #[test]
    fn disabled_log_creates_no_file() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = LoggingConfig {
            enable: false,
            file: dir.path().join("telemetry.log"),
            ..LoggingConfig::default()
        };
        let log = EventLog::from_config(&cfg).unwrap();
        assert!(!log.enabled(Level::Error));
        log.record(Level::Error, "netlat::test", format_args!("dropped"));
        assert!(!cfg.file.exists());
    }
}
