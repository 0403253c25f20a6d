// src/report.rs

//! Fixed-width console rendering of query results.

use crate::record::{DeviceLatency, HighLatencyEvent};
use std::fmt::Write;

const DEVICE_WIDTH: usize = 20;
const EVENT_LEFT_WIDTH: usize = 35;

pub const NO_HIGH_LATENCY_EVENTS: &str = "No high latency events found.";

/// Header plus one row per device. An empty slice renders the header only.
pub fn render_average_latency(rows: &[DeviceLatency]) -> String {
    let mut out = String::from("\nAverage Latency per Device:\n");
    let _ = writeln!(out, "{:<DEVICE_WIDTH$} Avg Latency (ms)", "Device");
    let _ = writeln!(out, "{}", "-".repeat(35));
    for row in rows {
        let _ = writeln!(out, "{:<DEVICE_WIDTH$} {:.2}", row.device, row.average_ms);
    }
    out
}

/// Table of events, or the "no events" line when `rows` is empty.
pub fn render_high_latency(threshold: f64, rows: &[HighLatencyEvent]) -> String {
    let mut out = format!("\nRecent High Latency Events (> {threshold:?} ms):\n");
    if rows.is_empty() {
        out.push_str(NO_HIGH_LATENCY_EVENTS);
        out.push('\n');
        return out;
    }
    let _ = writeln!(out, "{:<DEVICE_WIDTH$} {:<15} Timestamp", "Device", "Latency (ms)");
    let _ = writeln!(out, "{}", "-".repeat(50));
    for row in rows {
        let left = format!("{:<DEVICE_WIDTH$} {:.2}", row.device, row.latency_ms);
        let _ = writeln!(out, "{left:<EVENT_LEFT_WIDTH$} {}", row.timestamp);
    }
    out
}
