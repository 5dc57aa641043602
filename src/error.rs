//! Error types for the student-scores library.

use thiserror::Error;

/// Failure to turn a source file into a [`Dataset`](crate::data::model::Dataset).
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Unsupported file extension: .{0}")]
    UnsupportedFormat(String),

    #[error("Missing required column '{0}'")]
    MissingColumn(String),

    #[error("Row {row}, column '{column}': '{value}' {reason}")]
    MalformedRow {
        row: usize,
        column: String,
        value: String,
        reason: String,
    },
}

impl LoadError {
    pub(crate) fn malformed(row: usize, column: &str, value: &str, reason: &str) -> Self {
        LoadError::MalformedRow {
            row,
            column: column.to_string(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

/// A category key or label outside the fixed choice set.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown category '{0}'")]
pub struct UnknownCategoryError(pub String);

/// A score range that is inverted or leaves the 0..=100 domain.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Invalid score range [{lo}, {hi}]")]
pub struct InvalidRangeError {
    pub lo: u32,
    pub hi: u32,
}
