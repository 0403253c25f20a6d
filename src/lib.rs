// src/lib.rs
// ────────────────────────────────────────────────────────────────────────────
// Public library entry point.  Re-export everything for both `main.rs` and
// integration tests.

mod macros;

pub mod cli;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod record;
pub mod report;
pub mod store;

pub use error::{StoreError, Result};
pub use store::TelemetryStore;
