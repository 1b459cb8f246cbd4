mod config_loader;
pub use self::config_loader::ConfigLoader;
pub mod pipeline_config;
pub use self::pipeline_config::{
    ClassificationConfig, ClinicalConfig, GeneCountsConfig, MutationMapConfig, OncoprintConfig,
    PipelineConfig,
};
