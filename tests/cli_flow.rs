// tests/cli_flow.rs

use std::fs;
use clap::Parser;
use rand::{rngs::StdRng, SeedableRng};

use netlat::{
    cli::{run, ActionPlan, Cli, USAGE_EXAMPLE, USAGE_HINT},
    config::Config,
    logging::EventLog,
    record::TelemetryRecord,
    report::NO_HIGH_LATENCY_EVENTS,
    StoreError, TelemetryStore,
};

struct Harness {
    dir: tempfile::TempDir,
    cfg: Config,
    store: TelemetryStore,
}

fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let mut cfg = Config::default();
    cfg.database.path = dir.path().join("data").join("network_telemetry.db");
    cfg.export.path = dir.path().join("data").join("latest_telemetry.json");
    let store = TelemetryStore::new(&cfg, EventLog::disabled());
    Harness { dir, cfg, store }
}

/// Parse `args`, run them and return (result, console output).
fn invoke(h: &Harness, args: &[&str]) -> (Result<(), StoreError>, String) {
    let mut argv = vec!["netlat"];
    argv.extend_from_slice(args);
    let cli = Cli::try_parse_from(argv).unwrap();
    let plan = ActionPlan::from_cli(&cli, &h.cfg);

    let mut out = Vec::new();
    let res = run(&plan, &h.store, &mut StdRng::seed_from_u64(11), &mut out);
    (res, String::from_utf8(out).unwrap())
}

#[test]
fn no_flags_prints_usage_and_touches_nothing() {
    let h = harness();
    let (res, out) = invoke(&h, &[]);
    assert!(res.is_ok());
    assert_eq!(out, format!("{USAGE_HINT}\n{USAGE_EXAMPLE}\n"));
    assert!(!h.cfg.database.path.exists());
}

#[test]
fn full_pipeline_runs_in_order() {
    let h = harness();
    let (res, out) = invoke(&h, &["--init", "--insert", "30", "--avg", "--high", "0", "--export"]);
    res.unwrap();

    let ready = out.find("Database ready").unwrap();
    let inserted = out.find("Inserted 30 mock records").unwrap();
    let avg = out.find("Average Latency per Device:").unwrap();
    let high = out.find("Recent High Latency Events (> 0.0 ms):").unwrap();
    let exported = out.find("Data exported to").unwrap();
    assert!(ready < inserted && inserted < avg && avg < high && high < exported);

    let event_rows = out[high..exported]
        .lines()
        .filter(|l| l.contains('T') && l.contains('.') && !l.starts_with("Recent"))
        .count();
    assert_eq!(event_rows, 10);

    let text = fs::read_to_string(&h.cfg.export.path).unwrap();
    let exported: Vec<TelemetryRecord> = serde_json::from_str(&text).unwrap();
    assert_eq!(exported.len(), 30);
}

#[test]
fn each_action_implies_init() {
    let h = harness();
    let (res, out) = invoke(&h, &["--avg"]);
    res.unwrap();
    assert!(h.cfg.database.path.exists());
    assert!(out.contains("Average Latency per Device:"));
}

#[test]
fn high_without_matches_prints_no_events() {
    let h = harness();
    invoke(&h, &["--insert", "5"]).0.unwrap();

    let (res, out) = invoke(&h, &["--high", "1000"]);
    res.unwrap();
    assert!(out.contains(NO_HIGH_LATENCY_EVENTS));
    assert!(!out.contains("Timestamp"));
}

#[test]
fn avg_alone_does_not_run_high_latency_query() {
    let h = harness();
    let (_, out) = invoke(&h, &["--insert", "3", "--avg"]);
    assert!(!out.contains("Recent High Latency Events"));
}

#[test]
fn failure_stops_later_steps() {
    let h = harness();
    let target = h.dir.path().to_string_lossy().into_owned();
    let (res, out) = invoke(&h, &["--insert", "2", "--export", target.as_str()]);
    assert!(matches!(res, Err(StoreError::ExportFailed { .. })));
    assert!(out.contains("Inserted 2 mock records"));
    assert!(!out.contains("Data exported"));
}
