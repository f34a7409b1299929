//! Temporal train/validation split.
//!
//! Rows dated strictly before the cutoff train; rows on or after the
//! cutoff validate. No randomness anywhere — the split is a pure function
//! of the frame and the cutoff, so repeated calls agree. Either partition
//! may legally be empty here; the orchestrator refuses to fit or evaluate
//! on an empty partition.

use chrono::NaiveDate;
use polars::prelude::*;

/// Disjoint train/validation partitions whose union is the input frame.
#[derive(Debug, Clone)]
pub struct SplitFrames {
    pub train: DataFrame,
    pub validation: DataFrame,
}

/// Partition a cleaned frame at `cutoff`: train < cutoff <= validation.
pub fn split_by_date(
    df: &DataFrame,
    date_column: &str,
    cutoff: NaiveDate,
) -> Result<SplitFrames, SplitError> {
    if !df.schema().contains(date_column) {
        return Err(SplitError::MissingDateColumn(date_column.to_string()));
    }

    let train = df
        .clone()
        .lazy()
        .filter(col(date_column).lt(lit(cutoff)))
        .collect()
        .map_err(|e| SplitError::Filter(e.to_string()))?;

    let validation = df
        .clone()
        .lazy()
        .filter(col(date_column).gt_eq(lit(cutoff)))
        .collect()
        .map_err(|e| SplitError::Filter(e.to_string()))?;

    Ok(SplitFrames { train, validation })
}

#[derive(Debug, thiserror::Error)]
pub enum SplitError {
    #[error("missing date column: {0}")]
    MissingDateColumn(String),

    #[error("split filter failed: {0}")]
    Filter(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::clean;

    fn dated_frame(dates: &[&str]) -> DataFrame {
        let values: Vec<f64> = (0..dates.len()).map(|i| i as f64).collect();
        let df = df!(
            "Date" => dates,
            "Backward_Volatility" => &values,
        )
        .unwrap();
        clean(df, "Date").unwrap()
    }

    fn cutoff() -> NaiveDate {
        NaiveDate::from_ymd_opt(2022, 8, 1).unwrap()
    }

    #[test]
    fn test_split_partitions_by_cutoff() {
        let df = dated_frame(&["2022-07-29", "2022-07-30", "2022-08-01", "2022-08-02"]);
        let split = split_by_date(&df, "Date", cutoff()).unwrap();

        assert_eq!(split.train.height(), 2);
        assert_eq!(split.validation.height(), 2);
    }

    #[test]
    fn test_cutoff_row_goes_to_validation() {
        let df = dated_frame(&["2022-07-31", "2022-08-01"]);
        let split = split_by_date(&df, "Date", cutoff()).unwrap();

        assert_eq!(split.train.height(), 1);
        assert_eq!(split.validation.height(), 1);
        let vol = split.validation.column("Backward_Volatility").unwrap();
        assert_eq!(vol.f64().unwrap().get(0), Some(1.0));
    }

    #[test]
    fn test_split_preserves_every_row() {
        let df = dated_frame(&["2022-01-03", "2022-07-31", "2022-08-01", "2022-12-30"]);
        let split = split_by_date(&df, "Date", cutoff()).unwrap();
        assert_eq!(split.train.height() + split.validation.height(), df.height());
    }

    #[test]
    fn test_split_is_deterministic() {
        let df = dated_frame(&["2022-07-29", "2022-08-02", "2022-08-03"]);
        let first = split_by_date(&df, "Date", cutoff()).unwrap();
        let second = split_by_date(&df, "Date", cutoff()).unwrap();

        assert!(first.train.equals(&second.train));
        assert!(first.validation.equals(&second.validation));
    }

    #[test]
    fn test_split_allows_empty_train() {
        let df = dated_frame(&["2022-08-02", "2022-08-03"]);
        let split = split_by_date(&df, "Date", cutoff()).unwrap();

        assert_eq!(split.train.height(), 0);
        assert_eq!(split.validation.height(), 2);
    }

    #[test]
    fn test_split_allows_empty_validation() {
        let df = dated_frame(&["2022-07-29", "2022-07-30"]);
        let split = split_by_date(&df, "Date", cutoff()).unwrap();

        assert_eq!(split.train.height(), 2);
        assert_eq!(split.validation.height(), 0);
    }

    #[test]
    fn test_split_rejects_missing_date_column() {
        let df = df!("Backward_Volatility" => &[0.1, 0.2]).unwrap();
        let result = split_by_date(&df, "Date", cutoff());
        assert!(matches!(result, Err(SplitError::MissingDateColumn(_))));
    }
}
