// src/db/batch_inserts.rs

use rusqlite::{params, Connection, Result as SqlResult, Statement};
use crate::record::NewRecord;

/// Defines how to insert one row of type `Self`.
pub trait BatchInsert {
    fn insert_sql() -> &'static str;
    fn bind_and_execute(stmt: &mut Statement<'_>, record: &Self) -> SqlResult<()>;
}

/// TELEMETRY
impl BatchInsert for NewRecord {
    fn insert_sql() -> &'static str {
        "INSERT INTO telemetry (device, latency_ms, packet_loss, timestamp) \
         VALUES (?1, ?2, ?3, ?4)"
    }

    fn bind_and_execute(stmt: &mut Statement<'_>, rec: &NewRecord) -> SqlResult<()> {
        stmt.execute(params![
            rec.device,
            rec.latency_ms,
            rec.packet_loss,
            rec.timestamp,
        ])?;
        Ok(())
    }
}

/// Insert `records` inside one transaction. Either every row lands or none.
pub fn insert_batch<T: BatchInsert>(conn: &mut Connection, records: &[T]) -> SqlResult<usize> {
    let tx = conn.transaction()?;
    {
        let mut stmt = tx.prepare_cached(T::insert_sql())?;
        for rec in records {
            T::bind_and_execute(&mut stmt, rec)?;
        }
    }
    tx.commit()?;
    Ok(records.len())
}
