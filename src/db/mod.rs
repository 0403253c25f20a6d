// src/db/mod.rs
//! Public façade for DB helpers.

pub mod batch_inserts;
pub mod connection;
pub mod queries;

pub use batch_inserts::{insert_batch, BatchInsert};
pub use connection::{init_database, open_db_connection};
