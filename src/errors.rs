use std::io;

use thiserror::Error;

use crate::types::FieldName;

/// Error type for configuration, ingestion, and output failures.
///
/// Value-level data problems (unparsable dates, blank text, unmatched keys)
/// never surface here; they degrade to defaults inside the pipeline.
#[derive(Debug, Error)]
pub enum OrderNestError {
    #[error("{table} has no column named '{column}'")]
    MissingColumn { table: String, column: FieldName },
    #[error("{table} column index {index} out of range ({available} columns)")]
    ColumnOutOfRange {
        table: String,
        index: usize,
        available: usize,
    },
    #[error("{table} has duplicate column '{column}' after trimming whitespace")]
    DuplicateColumn { table: String, column: FieldName },
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid classification pattern: {0}")]
    Pattern(#[from] regex::Error),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
