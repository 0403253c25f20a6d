// src/record.rs

//! Row types for the `telemetry` table and the shapes returned by its queries.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Timestamp layout written to the `timestamp` column. Fixed width, so string
/// order equals chronological order.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

/// Format a local wall-clock time the way it is stored.
pub fn iso_timestamp(at: DateTime<Local>) -> String {
    at.naive_local().format(TIMESTAMP_FORMAT).to_string()
}

/// A record that has not been stored yet; `id` is assigned on insert.
#[derive(Debug, Clone, PartialEq)]
pub struct NewRecord {
    pub device: String,
    pub latency_ms: f64,
    pub packet_loss: f64,
    pub timestamp: String,
}

impl NewRecord {
    pub fn new(device: impl Into<String>, latency_ms: f64, packet_loss: f64, timestamp: impl Into<String>) -> Self {
        Self {
            device: device.into(),
            latency_ms,
            packet_loss,
            timestamp: timestamp.into(),
        }
    }
}

/// A stored row, as exported to JSON.
///
/// The metric columns are nullable in the schema, so they come back as
/// `Option` and export as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TelemetryRecord {
    pub id: i64,
    pub device: String,
    pub latency_ms: Option<f64>,
    pub packet_loss: Option<f64>,
    pub timestamp: String,
}

/// One row of the per-device average report.
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceLatency {
    pub device: String,
    pub average_ms: f64,
}

/// A record whose latency exceeded the requested threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct HighLatencyEvent {
    pub id: i64,
    pub device: String,
    pub latency_ms: f64,
    pub timestamp: String,
}
