//! Predictor/response schema and projection onto the design matrix.
//!
//! The schema is an explicit configuration value, not a compile-time
//! constant: tests and callers can vary the column list without touching
//! this module. Projection preserves row alignment — row i of the feature
//! matrix corresponds to row i of the label vector, always. The rest of
//! the pipeline depends on that invariant.

use polars::prelude::*;
use serde::{Deserialize, Serialize};

/// Canonical predictor columns, in their fixed order.
pub const CANONICAL_PREDICTORS: [&str; 12] = [
    "Backward_Volatility",
    "Sentiment_lag_1",
    "Sentiment_lag_2",
    "Sentiment_lag_3",
    "Sentiment_lag_4",
    "Sentiment_lag_5",
    "Response_lag_1",
    "Response_lag_2",
    "Response_lag_3",
    "Response_lag_4",
    "Response_lag_5",
    "Sum_of_lagged_response",
];

/// Canonical response (label) column.
pub const RESPONSE_COLUMN: &str = "Response";

/// Named, ordered predictor columns plus the response column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSchema {
    pub predictors: Vec<String>,
    pub response: String,
}

impl Default for FeatureSchema {
    fn default() -> Self {
        Self {
            predictors: CANONICAL_PREDICTORS.iter().map(|s| s.to_string()).collect(),
            response: RESPONSE_COLUMN.to_string(),
        }
    }
}

impl FeatureSchema {
    pub fn new(predictors: Vec<String>, response: String) -> Self {
        Self { predictors, response }
    }

    /// Check that every schema column exists in the frame.
    pub fn validate(&self, df: &DataFrame) -> Result<(), SchemaError> {
        let actual = df.schema();
        for name in self.predictors.iter().chain(std::iter::once(&self.response)) {
            if !actual.contains(name) {
                return Err(SchemaError::MissingColumn(name.clone()));
            }
        }
        Ok(())
    }

    /// Project a frame onto the predictor columns (in schema order) and the
    /// response column.
    ///
    /// Predictors are cast to f64 and labels to i64. A null in any selected
    /// column is an error here — cleaning is supposed to have removed it —
    /// never a silent default.
    pub fn project(&self, df: &DataFrame) -> Result<DesignMatrix, SchemaError> {
        self.validate(df)?;

        let n_rows = df.height();
        let mut columns: Vec<Vec<f64>> = Vec::with_capacity(self.predictors.len());
        for name in &self.predictors {
            columns.push(numeric_column(df, name, n_rows)?);
        }

        // Transpose column-major storage into the row-major matrix the
        // classifier consumes. Row order is the frame's row order.
        let rows: Vec<Vec<f64>> = (0..n_rows)
            .map(|i| columns.iter().map(|c| c[i]).collect())
            .collect();

        let labels = label_column(df, &self.response, n_rows)?;

        Ok(DesignMatrix {
            features: FeatureMatrix::new(self.predictors.len(), rows),
            labels,
        })
    }
}

fn numeric_column(df: &DataFrame, name: &str, n_rows: usize) -> Result<Vec<f64>, SchemaError> {
    let column = df
        .column(name)
        .map_err(|_| SchemaError::MissingColumn(name.to_string()))?;
    let cast = column.cast(&DataType::Float64).map_err(|e| SchemaError::NotNumeric {
        column: name.to_string(),
        message: e.to_string(),
    })?;
    let values = cast.f64().map_err(|e| SchemaError::NotNumeric {
        column: name.to_string(),
        message: e.to_string(),
    })?;

    let mut out = Vec::with_capacity(n_rows);
    for value in values.iter() {
        out.push(value.ok_or_else(|| SchemaError::UnexpectedNull {
            column: name.to_string(),
        })?);
    }
    Ok(out)
}

fn label_column(df: &DataFrame, name: &str, n_rows: usize) -> Result<Vec<i64>, SchemaError> {
    let column = df
        .column(name)
        .map_err(|_| SchemaError::MissingColumn(name.to_string()))?;
    let cast = column.cast(&DataType::Int64).map_err(|e| SchemaError::NotNumeric {
        column: name.to_string(),
        message: e.to_string(),
    })?;
    let values = cast.i64().map_err(|e| SchemaError::NotNumeric {
        column: name.to_string(),
        message: e.to_string(),
    })?;

    let mut out = Vec::with_capacity(n_rows);
    for value in values.iter() {
        out.push(value.ok_or_else(|| SchemaError::UnexpectedNull {
            column: name.to_string(),
        })?);
    }
    Ok(out)
}

/// Row-major numeric feature matrix with a fixed column count.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    n_columns: usize,
    rows: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    /// Build a matrix from row-major data.
    ///
    /// Every row must have exactly `n_columns` entries.
    pub fn new(n_columns: usize, rows: Vec<Vec<f64>>) -> Self {
        debug_assert!(rows.iter().all(|r| r.len() == n_columns));
        Self { n_columns, rows }
    }

    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_columns(&self) -> usize {
        self.n_columns
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[Vec<f64>] {
        &self.rows
    }
}

/// Aligned features and labels: row i of `features` pairs with `labels[i]`.
#[derive(Debug, Clone, PartialEq)]
pub struct DesignMatrix {
    pub features: FeatureMatrix,
    pub labels: Vec<i64>,
}

#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    #[error("missing required column: {0}")]
    MissingColumn(String),

    #[error("column '{column}' is not numeric: {message}")]
    NotNumeric { column: String, message: String },

    #[error("unexpected null in column '{column}' after cleaning")]
    UnexpectedNull { column: String },
}
