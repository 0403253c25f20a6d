// src/main.rs

//! netlat entry-point.
//!
//! 1. Parse flags and load configuration
//! 2. Open the operation log
//! 3. Run the requested actions against the store
//!
//! Errors are printed as one line on stdout and the process still exits 0.

use anyhow::Context;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use netlat::cli::{self, ActionPlan, Cli};
use netlat::config;
use netlat::logging::EventLog;
use netlat::store::TelemetryStore;

fn run_app(args: &Cli) -> anyhow::Result<()> {
    // 1 ─ Context
    let cfg = config::load(args.config.as_deref()).context("loading configuration")?;

    // 2 ─ Logging
    let log = EventLog::from_config(&cfg.logging).context("opening log file")?;

    // 3 ─ Store & actions
    let store = TelemetryStore::new(&cfg, log);
    let plan = ActionPlan::from_cli(args, &cfg);
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let stdout = std::io::stdout();
    cli::run(&plan, &store, &mut rng, &mut stdout.lock())?;
    Ok(())
}

fn main() {
    // --help, --version and bad flags all end here; none of them change the exit status.
    let args = match Cli::try_parse() {
        Ok(args) => args,
        Err(e) => {
            match cli::parse_error_line(&e) {
                Some(line) => println!("{line}"),
                None => {
                    let _ = e.print();
                }
            }
            return;
        }
    };
    if let Err(e) = run_app(&args) {
        println!("Error: {e:#}");
    }
}
