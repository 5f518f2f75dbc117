use std::path::PathBuf;

use thiserror::Error;

use crate::data::model::ColumnType;

/// Everything that can abort a load, summary, correlation or plot.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("cannot open {}: {source}", path.display())]
    File {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed CSV in {}: {source}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("line {line}: expected {expected} fields, found {actual}")]
    Shape {
        line: u64,
        expected: usize,
        actual: usize,
    },

    #[error("column '{column}', line {line}: cannot convert '{value}' to {expected}")]
    Conversion {
        column: String,
        line: u64,
        value: String,
        expected: ColumnType,
    },

    #[error("{context}: {reason}")]
    Degenerate { context: String, reason: String },

    #[error("sequences differ in length ({left} vs {right})")]
    LengthMismatch { left: usize, right: usize },

    #[error("column '{name}' not found")]
    ColumnNotFound { name: String },

    #[error("column '{name}' declared more than once")]
    DuplicateColumn { name: String },

    #[error("column '{column}' is {actual}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        actual: ColumnType,
    },

    #[error("outcome column '{column}', row {row}: value {value} is neither 0 nor 1")]
    InvalidOutcome {
        column: String,
        row: usize,
        value: i64,
    },

    #[error("cannot write output: {0}")]
    Output(#[from] std::io::Error),

    #[error("cannot open plot window: {0}")]
    Render(String),

    #[error("cannot write {}: {source}", path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl AnalysisError {
    pub(crate) fn degenerate(context: impl Into<String>, reason: impl Into<String>) -> Self {
        AnalysisError::Degenerate {
            context: context.into(),
            reason: reason.into(),
        }
    }
}
