//! Data ingestion and cleaning

pub mod clean;
pub mod ingest;

pub use clean::{clean, CleanError};
pub use ingest::{read_csv, IngestError};
