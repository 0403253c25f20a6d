// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

/// Low-level cause behind [`StoreError::StorageUnavailable`].
#[derive(Debug, Error)]
pub enum StorageFault {
    #[error("SQLite error: {0}")]
    Sql(#[from] rusqlite::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Low-level cause behind [`StoreError::ExportFailed`].
#[derive(Debug, Error)]
pub enum ExportFault {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum StoreError {
    /// The database file or table could not be created, opened, read or written.
    #[error("storage unavailable ({context}): {source}")]
    StorageUnavailable {
        context: &'static str,
        #[source]
        source: StorageFault,
    },

    /// Records were read but could not be written to the export destination.
    #[error("export to {} failed: {source}", .path.display())]
    ExportFailed {
        path: PathBuf,
        #[source]
        source: ExportFault,
    },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// Results could not be written to the console.
    #[error("console output failed: {0}")]
    Console(#[source] std::io::Error),
}

impl StoreError {
    pub(crate) fn storage(context: &'static str, source: impl Into<StorageFault>) -> Self {
        StoreError::StorageUnavailable { context, source: source.into() }
    }

    pub(crate) fn export(path: impl Into<PathBuf>, source: impl Into<ExportFault>) -> Self {
        StoreError::ExportFailed { path: path.into(), source: source.into() }
    }
}

pub type Result<T, E = StoreError> = std::result::Result<T, E>;
