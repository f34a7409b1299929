//! Evaluation metrics — pure functions, labels in, scalar out.
//!
//! No dependency on the data engine or the classifier.

/// Fraction of positions where `predicted` equals `actual`, in [0, 1].
///
/// Every label value is ordinary — neutral or tie classes get no special
/// treatment. The two slices must have equal length.
pub fn accuracy(predicted: &[i64], actual: &[i64]) -> Result<f64, MetricsError> {
    if predicted.len() != actual.len() {
        return Err(MetricsError::LengthMismatch {
            predicted: predicted.len(),
            actual: actual.len(),
        });
    }
    if predicted.is_empty() {
        return Err(MetricsError::Empty);
    }

    let matches = predicted
        .iter()
        .zip(actual.iter())
        .filter(|(p, a)| p == a)
        .count();
    Ok(matches as f64 / predicted.len() as f64)
}

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("length mismatch: {predicted} predicted labels vs {actual} true labels")]
    LengthMismatch { predicted: usize, actual: usize },

    #[error("cannot score an empty label set")]
    Empty,
}
