// src/db/queries.rs
//! Read-side SQL for the `telemetry` table.

use rusqlite::{params, Connection, Result as SqlResult};
use crate::record::{DeviceLatency, HighLatencyEvent, TelemetryRecord};

/// Mean latency per device, highest first; equal means sort by device name.
/// Rows with a NULL latency are ignored.
pub fn average_latency(conn: &Connection) -> SqlResult<Vec<DeviceLatency>> {
    let mut stmt = conn.prepare(
        "SELECT device, AVG(latency_ms) AS avg_latency \
           FROM telemetry \
          WHERE latency_ms IS NOT NULL \
          GROUP BY device \
          ORDER BY avg_latency DESC, device ASC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(DeviceLatency {
            device: r.get(0)?,
            average_ms: r.get(1)?,
        })
    })?;
    rows.collect()
}

/// Records with `latency_ms > threshold`, newest first.
pub fn high_latency_events(conn: &Connection, threshold: f64, limit: u32) -> SqlResult<Vec<HighLatencyEvent>> {
    let mut stmt = conn.prepare(
        "SELECT id, device, latency_ms, timestamp \
           FROM telemetry \
          WHERE latency_ms > ?1 \
          ORDER BY timestamp DESC, id DESC \
          LIMIT ?2",
    )?;
    let rows = stmt.query_map(params![threshold, limit], |r| {
        Ok(HighLatencyEvent {
            id: r.get(0)?,
            device: r.get(1)?,
            latency_ms: r.get(2)?,
            timestamp: r.get(3)?,
        })
    })?;
    rows.collect()
}

/// Every record, newest first.
pub fn all_records(conn: &Connection) -> SqlResult<Vec<TelemetryRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, device, latency_ms, packet_loss, timestamp \
           FROM telemetry \
          ORDER BY timestamp DESC, id DESC",
    )?;
    let rows = stmt.query_map([], |r| {
        Ok(TelemetryRecord {
            id: r.get(0)?,
            device: r.get(1)?,
            latency_ms: r.get(2)?,
            packet_loss: r.get(3)?,
            timestamp: r.get(4)?,
        })
    })?;
    rows.collect()
}

pub fn record_count(conn: &Connection) -> SqlResult<u64> {
    let n: i64 = conn.query_row("SELECT COUNT(*) FROM telemetry", [], |r| r.get(0))?;
    Ok(n as u64)
}
