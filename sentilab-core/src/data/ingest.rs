//! CSV ingestion.
//!
//! Reads the raw observation table from disk. Dates arrive as text; the
//! cleaner normalizes them afterwards. This is glue around the data-frame
//! engine, nothing more — schema enforcement happens downstream.

use polars::prelude::*;
use std::path::Path;

/// Read a headered CSV file into an eager DataFrame.
///
/// The schema is inferred; all the pipeline requires is that the date
/// column is text and the numeric columns parse as numbers.
pub fn read_csv(path: &Path) -> Result<DataFrame, IngestError> {
    if !path.exists() {
        return Err(IngestError::FileNotFound(path.display().to_string()));
    }
    LazyCsvReader::new(path)
        .with_has_header(true)
        .finish()
        .map_err(|e| IngestError::ReadFailed(e.to_string()))?
        .collect()
        .map_err(|e| IngestError::ReadFailed(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    #[error("file not found: {0}")]
    FileNotFound(String),

    #[error("CSV read failed: {0}")]
    ReadFailed(String),
}
