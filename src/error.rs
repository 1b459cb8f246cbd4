use crate::extract::error::ExtractionError;
use crate::load::error::LoadError;
use crate::transform::error::TransformError;
use config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;
use validator::ValidationErrors;

#[derive(Debug, Error)]
pub enum ConstructionError {
    #[error("Could not find config file at '{0}'")]
    NoConfigFileFound(PathBuf),
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    IOError(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Extraction(#[from] ExtractionError),
    #[error(transparent)]
    Transform(#[from] TransformError),
    #[error(transparent)]
    Validation(#[from] ValidationErrors),
    #[error(transparent)]
    Load(#[from] LoadError),
    #[error("No reports configured. Set 'reports' to the combined report document.")]
    NoReports,
    #[error("Failed to produce: {}", .0.join(", "))]
    FailedArtifacts(Vec<String>),
}
