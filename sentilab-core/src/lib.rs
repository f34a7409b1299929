//! SentiLab Core — market-direction classification pipeline.
//!
//! This crate contains the whole supervised pipeline:
//! - CSV ingestion and null-row cleaning with calendar-date normalization
//! - Temporal train/validation split at a configured cutoff date
//! - Projection onto the fixed predictor/response schema
//! - Classifier capability trait with a seeded tree-ensemble implementation
//! - Accuracy evaluation
//! - Linear pipeline orchestrator sequencing the stages
//!
//! Each stage consumes an immutable value and produces the next one; there
//! is no hidden call-order state. A run either reaches `Evaluated` and
//! yields one accuracy scalar, or aborts with exactly one stage error.

pub mod config;
pub mod data;
pub mod metrics;
pub mod model;
pub mod pipeline;
pub mod schema;
pub mod split;

pub use config::{ConfigError, PipelineConfig};
pub use data::{clean, read_csv, CleanError, IngestError};
pub use metrics::{accuracy, MetricsError};
pub use model::{
    Classifier, ForestClassifier, ForestParams, MajorityClassifier, ModelError,
};
pub use pipeline::{DirectionPipeline, PipelineError, RunReport};
pub use schema::{DesignMatrix, FeatureMatrix, FeatureSchema, SchemaError};
pub use split::{split_by_date, SplitError, SplitFrames};
