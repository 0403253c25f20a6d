// src/cli.rs

//! Flag parsing and the fixed init → insert → avg → high → export dispatch.
//!
//! Each flag is tracked as present/absent separately from its value, so
//! `--high 0` is a request and a bare run is "no action".

use crate::config::model::Config;
use crate::error::{Result, StoreError};
use crate::report;
use crate::store::TelemetryStore;
use clap::Parser;
use rand::Rng;
use std::io::Write;
use std::path::PathBuf;

pub const USAGE_HINT: &str = "No action specified. Use --help for options.";
pub const USAGE_EXAMPLE: &str = "Example: netlat --init --insert 50 --avg --high 80 --export";

#[derive(Parser, Debug)]
#[command(name = "netlat")]
#[command(version, about = "Network telemetry store: mock records, latency queries and JSON export")]
pub struct Cli {
    /// Create the database and table if absent
    #[arg(long)]
    pub init: bool,

    /// Insert N mock records
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(u32).range(1..))]
    pub insert: Option<u32>,

    /// Show average latency per device
    #[arg(long)]
    pub avg: bool,

    /// Show recent events above a latency threshold in ms (default from config, 100.0)
    #[arg(long, value_name = "MS", num_args = 0..=1, allow_negative_numbers = true)]
    pub high: Option<Option<f64>>,

    /// Export all records to JSON (default path from config)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub export: Option<Option<PathBuf>>,

    /// Configuration file (defaults to ./telemetry.toml when present)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Seed for mock data, for reproducible runs
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,
}

/// What the user asked for, with defaults resolved against the config.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ActionPlan {
    pub init: bool,
    pub insert: Option<usize>,
    pub avg: bool,
    pub high: Option<f64>,
    pub export: Option<PathBuf>,
}

impl ActionPlan {
    pub fn from_cli(cli: &Cli, cfg: &Config) -> Self {
        Self {
            init: cli.init,
            insert: cli.insert.map(|n| n as usize),
            avg: cli.avg,
            high: cli
                .high
                .map(|t| t.unwrap_or(cfg.query.high_latency_threshold)),
            export: cli
                .export
                .as_ref()
                .map(|p| p.clone().unwrap_or_else(|| cfg.export.path.clone())),
        }
    }

    pub fn is_empty(&self) -> bool {
        !self.init && self.insert.is_none() && !self.avg && self.high.is_none() && self.export.is_none()
    }
}

/// Run the plan in the fixed order, writing console output to `out`. Every
/// step ensures the schema first. Stops at the first failing step.
pub fn run<R, W>(plan: &ActionPlan, store: &TelemetryStore, rng: &mut R, out: &mut W) -> Result<()>
where
    R: Rng + ?Sized,
    W: Write,
{
    if plan.is_empty() {
        writeln!(out, "{USAGE_HINT}").map_err(StoreError::Console)?;
        writeln!(out, "{USAGE_EXAMPLE}").map_err(StoreError::Console)?;
        return Ok(());
    }

    if plan.init {
        store.initialize()?;
        writeln!(out, "Database ready at {}", store.db_path().display()).map_err(StoreError::Console)?;
    }

    if let Some(count) = plan.insert {
        store.initialize()?;
        let n = store.insert_mock_records(rng, count)?;
        writeln!(out, "Inserted {n} mock records").map_err(StoreError::Console)?;
    }

    if plan.avg {
        store.initialize()?;
        let rows = store.average_latency()?;
        write!(out, "{}", report::render_average_latency(&rows)).map_err(StoreError::Console)?;
    }

    if let Some(threshold) = plan.high {
        store.initialize()?;
        let rows = store.high_latency_events(threshold)?;
        write!(out, "{}", report::render_high_latency(threshold, &rows)).map_err(StoreError::Console)?;
    }

    if let Some(path) = &plan.export {
        store.initialize()?;
        store.export_to_json(path)?;
        writeln!(out, "\nData exported to {}", path.display()).map_err(StoreError::Console)?;
    }

    Ok(())
}

/// One-line message for a flag parsing failure, or `None` for `--help` and
/// `--version`, which clap reports through the same error type.
pub fn parse_error_line(err: &clap::Error) -> Option<String> {
    use clap::error::ErrorKind;
    match err.kind() {
        ErrorKind::DisplayHelp
        | ErrorKind::DisplayVersion
        | ErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => None,
        _ => {
            let text = err.to_string();
            let first = text.lines().next().unwrap_or_default();
            Some(format!("Error: {}", first.trim_start_matches("error: ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(args: &[&str]) -> ActionPlan {
        let mut argv = vec!["netlat"];
        argv.extend_from_slice(args);
        let cli = Cli::try_parse_from(argv).unwrap();
        ActionPlan::from_cli(&cli, &Config::default())
    }

    #[test]
    fn no_flags_is_empty() {
        assert!(plan(&[]).is_empty());
    }

    #[test]
    fn high_runs_only_when_requested() {
        assert_eq!(plan(&["--avg"]).high, None);
        assert_eq!(plan(&["--high"]).high, Some(100.0));
        assert_eq!(plan(&["--high", "80"]).high, Some(80.0));
        assert_eq!(plan(&["--high", "-5"]).high, Some(-5.0));
        assert_eq!(plan(&["--high", "-5", "--avg"]).high, Some(-5.0));
    }

    #[test]
    fn zero_threshold_counts_as_an_action() {
        let p = plan(&["--high", "0.0"]);
        assert_eq!(p.high, Some(0.0));
        assert!(!p.is_empty());
    }

    #[test]
    fn export_path_defaults_from_config() {
        assert_eq!(plan(&["--export"]).export, Some(PathBuf::from("data/latest_telemetry.json")));
        assert_eq!(plan(&["--export", "out/x.json"]).export, Some(PathBuf::from("out/x.json")));
    }

    #[test]
    fn insert_zero_is_rejected_by_parser() {
        assert!(Cli::try_parse_from(["netlat", "--insert", "0"]).is_err());
        assert_eq!(plan(&["--insert", "50"]).insert, Some(50));
    }

    #[test]
    fn configured_threshold_applies_to_bare_flag() {
        let mut cfg = Config::default();
        cfg.query.high_latency_threshold = 42.5;
        let cli = Cli::try_parse_from(["netlat", "--high"]).unwrap();
        assert_eq!(ActionPlan::from_cli(&cli, &cfg).high, Some(42.5));
    }

    #[test]
    fn bad_flags_become_one_stdout_line() {
        let err = Cli::try_parse_from(["netlat", "--bogus"]).unwrap_err();
        let line = parse_error_line(&err).unwrap();
        assert!(line.starts_with("Error: "), "{line}");
        assert!(line.contains("--bogus"), "{line}");
        assert!(!line.contains('\n'));

        let help = Cli::try_parse_from(["netlat", "--help"]).unwrap_err();
        assert_eq!(parse_error_line(&help), None);
    }

    /// Sink that refuses every write.
    struct BrokenPipe;

    impl Write for BrokenPipe {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
        }
        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn console_write_failure_is_returned() {
        use crate::logging::EventLog;
        use rand::{rngs::StdRng, SeedableRng};

        let dir = tempfile::tempdir().unwrap();
        let mut cfg = Config::default();
        cfg.database.path = dir.path().join("t.db");
        let store = TelemetryStore::new(&cfg, EventLog::disabled());

        let res = run(&ActionPlan::default(), &store, &mut StdRng::seed_from_u64(1), &mut BrokenPipe);
        assert!(matches!(res, Err(StoreError::Console(_))));

        let init = ActionPlan { init: true, ..ActionPlan::default() };
        let res = run(&init, &store, &mut StdRng::seed_from_u64(1), &mut BrokenPipe);
        assert!(matches!(res, Err(StoreError::Console(_))));
        assert!(cfg.database.path.exists());
    }
}
