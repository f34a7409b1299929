//! Row cleaning and date normalization.
//!
//! Two responsibilities, applied in order:
//! 1. Drop every row containing a null in any column.
//! 2. Normalize the date column to a pure calendar `Date` dtype — text is
//!    parsed, datetimes are truncated, dates pass through.
//!
//! The input frame is consumed; a new frame is returned. Downstream stages
//! rely on the invariant that no null survives this stage.

use polars::prelude::*;

/// Clean a raw observation frame.
///
/// Fails with [`CleanError::MissingDateColumn`] when `date_column` is
/// absent and [`CleanError::DateParse`] when a date value does not parse.
pub fn clean(df: DataFrame, date_column: &str) -> Result<DataFrame, CleanError> {
    let date_dtype = df
        .column(date_column)
        .map_err(|_| CleanError::MissingDateColumn(date_column.to_string()))?
        .dtype()
        .clone();

    let complete = df
        .lazy()
        .drop_nulls(None)
        .collect()
        .map_err(|e| CleanError::Frame(e.to_string()))?;

    let date_expr = match date_dtype {
        DataType::Date => return Ok(complete),
        DataType::Datetime(_, _) => col(date_column).cast(DataType::Date),
        DataType::String => col(date_column).str().to_date(StrptimeOptions::default()),
        other => {
            return Err(CleanError::DateParse(format!(
                "column '{date_column}' has dtype {other:?}, expected a date-like column"
            )))
        }
    };

    complete
        .lazy()
        .with_columns([date_expr])
        .collect()
        .map_err(|e| CleanError::DateParse(e.to_string()))
}

#[derive(Debug, thiserror::Error)]
pub enum CleanError {
    #[error("missing date column: {0}")]
    MissingDateColumn(String),

    #[error("date parse failed: {0}")]
    DateParse(String),

    #[error("frame operation failed: {0}")]
    Frame(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_drops_null_rows() {
        let df = df!(
            "Date" => &["2022-07-01", "2022-07-04", "2022-07-05"],
            "Backward_Volatility" => &[Some(0.12), None, Some(0.09)],
            "Response" => &[Some(1i64), Some(0), None],
        )
        .unwrap();

        let cleaned = clean(df, "Date").unwrap();
        assert_eq!(cleaned.height(), 1);
    }

    #[test]
    fn test_clean_parses_text_dates() {
        let df = df!(
            "Date" => &["2022-07-01", "2022-08-02"],
            "Backward_Volatility" => &[0.12, 0.15],
        )
        .unwrap();

        let cleaned = clean(df, "Date").unwrap();
        assert_eq!(cleaned.column("Date").unwrap().dtype(), &DataType::Date);
    }

    #[test]
    fn test_clean_passes_through_date_dtype() {
        let df = df!(
            "Date" => &["2022-07-01", "2022-08-02"],
            "Backward_Volatility" => &[0.12, 0.15],
        )
        .unwrap();

        // Cleaning an already-cleaned frame is a no-op.
        let once = clean(df, "Date").unwrap();
        let twice = clean(once.clone(), "Date").unwrap();
        assert_eq!(twice.column("Date").unwrap().dtype(), &DataType::Date);
        assert_eq!(twice.height(), once.height());
    }

    #[test]
    fn test_clean_rejects_missing_date_column() {
        let df = df!(
            "Backward_Volatility" => &[0.12, 0.15],
        )
        .unwrap();

        let result = clean(df, "Date");
        assert!(matches!(result, Err(CleanError::MissingDateColumn(_))));
    }

    #[test]
    fn test_clean_rejects_unparseable_date() {
        let df = df!(
            "Date" => &["2022-07-01", "not a date"],
            "Backward_Volatility" => &[0.12, 0.15],
        )
        .unwrap();

        let result = clean(df, "Date");
        assert!(matches!(result, Err(CleanError::DateParse(_))));
    }

    #[test]
    fn test_clean_does_not_drop_complete_rows() {
        let df = df!(
            "Date" => &["2022-07-01", "2022-07-04", "2022-08-02"],
            "Backward_Volatility" => &[0.12, 0.10, 0.15],
            "Response" => &[1i64, 0, 1],
        )
        .unwrap();

        let cleaned = clean(df, "Date").unwrap();
        assert_eq!(cleaned.height(), 3);
    }

    #[test]
    fn test_clean_all_null_rows_yields_empty_frame() {
        let df = df!(
            "Date" => &[Some("2022-07-01"), None],
            "Backward_Volatility" => &[None, Some(0.15)],
        )
        .unwrap();

        let cleaned = clean(df, "Date").unwrap();
        assert_eq!(cleaned.height(), 0);
    }
}
