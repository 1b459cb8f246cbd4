use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("Input file '{0}' does not exist")]
    MissingFile(PathBuf),
    #[error("Expected the report collection to be a JSON object keyed by file name, found {0}.")]
    UnexpectedReportShape(String),
    #[error("Table '{table}' has no '{column}' column.")]
    MissingColumn { table: String, column: String },
    #[error("Table '{table}' has a row without a {column} in line {line}.")]
    MissingIdentifier {
        table: String,
        column: String,
        line: usize,
    },
    #[error(transparent)]
    Polars(#[from] PolarsError),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
