//! Classifier capability trait and its implementations.
//!
//! The pipeline never sees a concrete learning algorithm, only this trait.
//! Implementations must be deterministic for a fixed seed, must reject a
//! prediction matrix whose width differs from the fitted one, and must
//! refuse to predict before `fit`.

use serde::{Deserialize, Serialize};
use smartcore::ensemble::random_forest_classifier::{
    RandomForestClassifier, RandomForestClassifierParameters,
};
use smartcore::linalg::basic::matrix::DenseMatrix;
use std::collections::BTreeMap;

use crate::schema::FeatureMatrix;

/// Fit/predict capability consumed by the orchestrator.
///
/// Lifecycle: created unfitted, mutated by exactly one `fit` call per
/// pipeline run, then used read-only by `predict`. Predictions come back
/// in input row order, one label per row.
pub trait Classifier {
    fn fit(&mut self, features: &FeatureMatrix, labels: &[i64]) -> Result<(), ModelError>;
    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<i64>, ModelError>;
}

#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    #[error("predict called before fit")]
    NotFitted,

    #[error("feature count mismatch: model fitted on {expected} columns, got {actual}")]
    FeatureCountMismatch { expected: usize, actual: usize },

    #[error("label count mismatch: {rows} feature rows, {labels} labels")]
    LabelCountMismatch { rows: usize, labels: usize },

    #[error("training failed: {0}")]
    TrainingFailed(String),

    #[error("prediction failed: {0}")]
    PredictionFailed(String),
}

// ─── Tree-ensemble classifier ────────────────────────────────────────

/// Hyperparameters for [`ForestClassifier`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForestParams {
    /// Number of trees in the ensemble.
    pub n_trees: u16,
    /// Maximum tree depth (None = unbounded).
    pub max_depth: Option<u16>,
    /// Seed for bootstrap sampling. Fixed seed means reproducible runs.
    pub seed: u64,
}

impl Default for ForestParams {
    fn default() -> Self {
        Self {
            n_trees: 100,
            max_depth: None,
            seed: 42,
        }
    }
}

/// Seeded random-forest classifier over f64 features and i64 labels.
pub struct ForestClassifier {
    params: ForestParams,
    fitted: Option<RandomForestClassifier<f64, i64, DenseMatrix<f64>, Vec<i64>>>,
    n_features: usize,
}

impl ForestClassifier {
    pub fn new(params: ForestParams) -> Self {
        Self {
            params,
            fitted: None,
            n_features: 0,
        }
    }

    fn smartcore_params(&self) -> RandomForestClassifierParameters {
        let mut p = RandomForestClassifierParameters::default()
            .with_n_trees(self.params.n_trees)
            .with_seed(self.params.seed);
        if let Some(depth) = self.params.max_depth {
            p = p.with_max_depth(depth);
        }
        p
    }
}

impl Default for ForestClassifier {
    fn default() -> Self {
        Self::new(ForestParams::default())
    }
}

impl Classifier for ForestClassifier {
    fn fit(&mut self, features: &FeatureMatrix, labels: &[i64]) -> Result<(), ModelError> {
        if features.n_rows() != labels.len() {
            return Err(ModelError::LabelCountMismatch {
                rows: features.n_rows(),
                labels: labels.len(),
            });
        }
        if features.is_empty() {
            return Err(ModelError::TrainingFailed("no training rows".into()));
        }

        let x = DenseMatrix::from_2d_vec(&features.rows().to_vec());
        let y = labels.to_vec();
        let model = RandomForestClassifier::fit(&x, &y, self.smartcore_params())
            .map_err(|e| ModelError::TrainingFailed(e.to_string()))?;

        self.fitted = Some(model);
        self.n_features = features.n_columns();
        Ok(())
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<i64>, ModelError> {
        let model = self.fitted.as_ref().ok_or(ModelError::NotFitted)?;
        if features.n_columns() != self.n_features {
            return Err(ModelError::FeatureCountMismatch {
                expected: self.n_features,
                actual: features.n_columns(),
            });
        }
        if features.is_empty() {
            return Ok(Vec::new());
        }

        let x = DenseMatrix::from_2d_vec(&features.rows().to_vec());
        model
            .predict(&x)
            .map_err(|e| ModelError::PredictionFailed(e.to_string()))
    }
}

// ─── Majority-class baseline ─────────────────────────────────────────

/// Null model: always predicts the most frequent training label.
///
/// Ties break toward the smaller label so the baseline stays
/// deterministic. Useful as a floor in evaluation and in tests.
#[derive(Debug, Default, Clone)]
pub struct MajorityClassifier {
    majority: Option<i64>,
    n_features: usize,
}

impl MajorityClassifier {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Classifier for MajorityClassifier {
    fn fit(&mut self, features: &FeatureMatrix, labels: &[i64]) -> Result<(), ModelError> {
        if features.n_rows() != labels.len() {
            return Err(ModelError::LabelCountMismatch {
                rows: features.n_rows(),
                labels: labels.len(),
            });
        }
        if labels.is_empty() {
            return Err(ModelError::TrainingFailed("no training rows".into()));
        }

        let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
        for &label in labels {
            *counts.entry(label).or_insert(0) += 1;
        }
        // Descending label order + max_by_key keeping the last maximum
        // means the smaller label wins a tie.
        let majority = counts
            .iter()
            .rev()
            .max_by_key(|&(_, &count)| count)
            .map(|(&label, _)| label);

        self.majority = majority;
        self.n_features = features.n_columns();
        Ok(())
    }

    fn predict(&self, features: &FeatureMatrix) -> Result<Vec<i64>, ModelError> {
        let majority = self.majority.ok_or(ModelError::NotFitted)?;
        if features.n_columns() != self.n_features {
            return Err(ModelError::FeatureCountMismatch {
                expected: self.n_features,
                actual: features.n_columns(),
            });
        }
        Ok(vec![majority; features.n_rows()])
    }
}
