//! Pipeline orchestrator — wires together cleaning, split, projection,
//! fit, and evaluation.
//!
//! The run is a straight line: clean → split → project → fit → predict →
//! score. Each stage returns an immutable value consumed by the next, so
//! there is no call-order state to get wrong. The first failing stage
//! aborts the run with its error; nothing is retried or defaulted.

use chrono::NaiveDate;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};

use crate::config::PipelineConfig;
use crate::data::{clean, CleanError};
use crate::metrics::{accuracy, MetricsError};
use crate::model::{Classifier, ModelError};
use crate::schema::SchemaError;
use crate::split::{split_by_date, SplitError};

/// Errors from a pipeline run. Exactly one surfaces per failed run.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("clean error: {0}")]
    Clean(#[from] CleanError),

    #[error("split error: {0}")]
    Split(#[from] SplitError),

    #[error("schema error: {0}")]
    Schema(#[from] SchemaError),

    #[error("model error: {0}")]
    Model(#[from] ModelError),

    #[error("metrics error: {0}")]
    Metrics(#[from] MetricsError),

    #[error("no training rows before cutoff {cutoff}")]
    TrainingDataEmpty { cutoff: NaiveDate },

    #[error("no validation rows on or after cutoff {cutoff}")]
    EvaluationDataEmpty { cutoff: NaiveDate },
}

/// Result of a completed run. The accuracy scalar is the mandated output;
/// the row counts are provenance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub accuracy: f64,
    pub train_rows: usize,
    pub validation_rows: usize,
    pub cutoff_date: NaiveDate,
}

/// One-shot direction-prediction pipeline over a raw observation frame.
///
/// Owns its classifier exclusively for the duration of the run; a second
/// run needs a fresh pipeline. Independent pipelines may run in parallel.
pub struct DirectionPipeline<C: Classifier> {
    config: PipelineConfig,
    classifier: C,
}

impl<C: Classifier> DirectionPipeline<C> {
    pub fn new(config: PipelineConfig, classifier: C) -> Self {
        Self { config, classifier }
    }

    /// Run the pipeline to completion on `raw` and report the validation
    /// accuracy.
    pub fn run(mut self, raw: DataFrame) -> Result<RunReport, PipelineError> {
        let cutoff = self.config.cutoff_date;

        let cleaned = clean(raw, &self.config.date_column)?;
        let split = split_by_date(&cleaned, &self.config.date_column, cutoff)?;

        if split.train.height() == 0 {
            return Err(PipelineError::TrainingDataEmpty { cutoff });
        }
        if split.validation.height() == 0 {
            return Err(PipelineError::EvaluationDataEmpty { cutoff });
        }

        let schema = self.config.feature_schema();
        let train = schema.project(&split.train)?;
        let validation = schema.project(&split.validation)?;

        self.classifier.fit(&train.features, &train.labels)?;
        let predicted = self.classifier.predict(&validation.features)?;
        let acc = accuracy(&predicted, &validation.labels)?;

        Ok(RunReport {
            accuracy: acc,
            train_rows: split.train.height(),
            validation_rows: split.validation.height(),
            cutoff_date: cutoff,
        })
    }
}
