// src/store/mod.rs

//! # Telemetry store
//!
//! Every operation opens its own connection and drops it before returning.
//! Failures are written to the operation log with full detail and then
//! handed back to the caller.

pub mod mock;

use crate::config::model::{Config, DatabaseConfig};
use crate::db::{self, queries};
use crate::error::{ExportFault, Result, StoreError};
use crate::logging::EventLog;
use crate::record::{iso_timestamp, DeviceLatency, HighLatencyEvent, NewRecord, TelemetryRecord};
use crate::store_log;
use chrono::Local;
use log::Level;
use rand::Rng;
use rusqlite::Connection;
use std::{
    fs::{self, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};

#[derive(Debug)]
pub struct TelemetryStore {
    db_path: PathBuf,
    db_cfg: DatabaseConfig,
    devices: Vec<String>,
    high_latency_limit: u32,
    log: EventLog,
}

impl TelemetryStore {
    pub fn new(cfg: &Config, log: EventLog) -> Self {
        Self {
            db_path: cfg.database.path.clone(),
            db_cfg: cfg.database.clone(),
            devices: cfg.mock.devices.clone(),
            high_latency_limit: cfg.query.high_latency_limit,
            log,
        }
    }

    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Device names mock records are drawn from.
    pub fn devices(&self) -> &[String] {
        &self.devices
    }

    /// Create the database file and `telemetry` table if missing.
    pub fn initialize(&self) -> Result<()> {
        let res = db::init_database(&self.db_path, &self.db_cfg)
            .map(drop)
            .map_err(|e| StoreError::storage("initialize", e));
        self.finish("Database initialization", res, |_| {
            format!("Database initialized at {}", self.db_path.display())
        })
    }

    /// Generate and append `count` mock records in one transaction.
    pub fn insert_mock_records<R: Rng + ?Sized>(&self, rng: &mut R, count: usize) -> Result<usize> {
        if count == 0 {
            return self.finish(
                "Insert",
                Err(StoreError::InvalidInput("record count must be positive".into())),
                |_| String::new(),
            );
        }
        let batch = mock::mock_batch(rng, &self.devices, count, || iso_timestamp(Local::now()))
            .ok_or_else(|| StoreError::InvalidInput("no mock devices configured".into()));
        match batch {
            Ok(records) => self.append(&records, "mock "),
            Err(e) => self.finish("Insert", Err(e), |_| String::new()),
        }
    }

    /// Append caller-supplied records in one transaction.
    pub fn insert_records(&self, records: &[NewRecord]) -> Result<usize> {
        if let Some(bad) = records.iter().find(|r| r.device.trim().is_empty()) {
            let err = StoreError::InvalidInput(format!("empty device name in record stamped {}", bad.timestamp));
            return self.finish("Insert", Err(err), |_| String::new());
        }
        self.append(records, "")
    }

    fn append(&self, records: &[NewRecord], kind: &str) -> Result<usize> {
        let res = self.connect("insert").and_then(|mut conn| {
            db::insert_batch(&mut conn, records).map_err(|e| {
                StoreError::storage("insert", e)
            })
        });
        self.finish(
            &format!("Insert of {} {kind}records", records.len()),
            res,
            |n| format!("Inserted {n} {kind}records"),
        )
    }

    /// Mean latency per device, highest first; ties ordered by device name.
    pub fn average_latency(&self) -> Result<Vec<DeviceLatency>> {
        let res = self.connect("average query").and_then(|conn| {
            queries::average_latency(&conn).map_err(|e| StoreError::storage("average query", e))
        });
        self.finish("Average latency query", res, |rows| {
            format!("Queried average latency per device ({} devices)", rows.len())
        })
    }

    /// Up to the configured limit (10 by default) of records with
    /// `latency_ms > threshold`, newest first.
    pub fn high_latency_events(&self, threshold: f64) -> Result<Vec<HighLatencyEvent>> {
        if !threshold.is_finite() {
            let err = StoreError::InvalidInput(format!("threshold must be a finite number, got {threshold}"));
            return self.finish("High latency query", Err(err), |_| String::new());
        }
        let res = self.connect("high latency query").and_then(|conn| {
            queries::high_latency_events(&conn, threshold, self.high_latency_limit)
                .map_err(|e| StoreError::storage("high latency query", e))
        });
        self.finish("High latency query", res, |rows| {
            format!("Queried high latency events (> {threshold} ms): {} found", rows.len())
        })
    }

    /// Every stored record, newest first.
    pub fn all_records(&self) -> Result<Vec<TelemetryRecord>> {
        let res = self.connect("read").and_then(|conn| {
            queries::all_records(&conn).map_err(|e| StoreError::storage("read", e))
        });
        self.finish("Record read", res, |rows| format!("Read {} records", rows.len()))
    }

    pub fn record_count(&self) -> Result<u64> {
        let res = self.connect("count").and_then(|conn| {
            queries::record_count(&conn).map_err(|e| StoreError::storage("count", e))
        });
        self.finish("Record count", res, |n| format!("Counted {n} records"))
    }

    /// Write every record to `path` as a pretty-printed JSON array, creating
    /// parent directories. Returns the number of records written.
    pub fn export_to_json(&self, path: &Path) -> Result<usize> {
        let records = self.all_records()?;
        let res = write_json(path, &records)
            .map(|()| records.len())
            .map_err(|e| StoreError::export(path, e));
        self.finish("Export", res, |n| {
            format!("Exported {n} telemetry records to {}", path.display())
        })
    }

    fn connect(&self, context: &'static str) -> Result<Connection> {
        db::open_db_connection(&self.db_path, &self.db_cfg).map_err(|e| StoreError::storage(context, e))
    }

    /// Log the outcome of one operation and pass it through.
    fn finish<T>(&self, what: &str, res: Result<T>, ok_msg: impl FnOnce(&T) -> String) -> Result<T> {
        match &res {
            Ok(v) => store_log!(self.log, Level::Info, "{}", ok_msg(v)),
            Err(e) => store_log!(self.log, Level::Error, "{what} failed: {e}"),
        }
        self.log.flush();
        res
    }
}

fn write_json(path: &Path, records: &[TelemetryRecord]) -> std::result::Result<(), ExportFault> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let mut out = BufWriter::new(File::create(path)?);
    serde_json::to_writer_pretty(&mut out, records)?;
    out.write_all(b"\n")?;
    out.flush()?;
    Ok(())
}
