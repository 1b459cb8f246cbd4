use polars::prelude::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("Could not create output directory {path}: {reason}")]
    NoStorage { path: PathBuf, reason: String },
    #[error("Could not store {artifact}: {reason}")]
    CantStore { artifact: String, reason: String },
    #[error(transparent)]
    Polars(#[from] PolarsError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}
