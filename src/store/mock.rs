// src/store/mock.rs

//! # Mock telemetry
//!
//! Synthetic rows for demos and tests. The random source is a parameter so
//! callers decide between entropy and a seeded `StdRng`.

use crate::record::NewRecord;
use rand::{seq::SliceRandom, Rng};
use std::ops::RangeInclusive;

pub const LATENCY_RANGE_MS: RangeInclusive<f64> = 1.0..=200.0;
pub const PACKET_LOSS_RANGE_PCT: RangeInclusive<f64> = 0.0..=5.0;

/// Draw one record: device uniform over `devices`, metrics uniform over their
/// ranges. Returns `None` when `devices` is empty.
pub fn mock_record<R: Rng + ?Sized>(rng: &mut R, devices: &[String], timestamp: String) -> Option<NewRecord> {
    let device = devices.choose(rng)?.clone();
    Some(NewRecord {
        device,
        latency_ms: rng.gen_range(LATENCY_RANGE_MS),
        packet_loss: rng.gen_range(PACKET_LOSS_RANGE_PCT),
        timestamp,
    })
}

/// Draw `count` records, stamping each with a fresh value from `clock`.
pub fn mock_batch<R, C>(rng: &mut R, devices: &[String], count: usize, mut clock: C) -> Option<Vec<NewRecord>>
where
    R: Rng + ?Sized,
    C: FnMut() -> String,
{
    (0..count).map(|_| mock_record(rng, devices, clock())).collect()
}
