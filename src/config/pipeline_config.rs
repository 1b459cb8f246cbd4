use crate::config::ConfigLoader;
use crate::constants::DEFAULT_AMPLIFICATION_THRESHOLD;
use crate::error::ConstructionError;
use crate::validation::config_validation::{validate_file_name, validate_gene_names};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use validator::Validate;

/// Describes one batch run: where the reports and flat tables live and which
/// oncoprint artifacts to produce.
#[derive(Debug, Deserialize, Serialize, Validate, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct PipelineConfig {
    /// Combined report document. Without it the flat tables in `data_dir` are used as they are.
    #[serde(default)]
    pub reports: Option<PathBuf>,
    pub data_dir: PathBuf,
    pub output_dir: PathBuf,
    /// If true will create the output directory
    #[serde(default = "default_true")]
    pub create_dir: bool,
    #[serde(default)]
    #[validate(nested)]
    pub classification: ClassificationConfig,
    #[serde(default)]
    #[validate(nested)]
    pub oncoprint: OncoprintConfig,
    #[serde(default)]
    #[validate(nested)]
    pub clinical: ClinicalConfig,
    #[serde(default)]
    #[validate(nested)]
    pub mutation_map: MutationMapConfig,
    #[serde(default)]
    #[validate(nested)]
    pub gene_counts: GeneCountsConfig,
}

impl PipelineConfig {
    pub fn new(data_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            reports: None,
            data_dir: data_dir.into(),
            output_dir: output_dir.into(),
            create_dir: true,
            classification: ClassificationConfig::default(),
            oncoprint: OncoprintConfig::default(),
            clinical: ClinicalConfig::default(),
            mutation_map: MutationMapConfig::default(),
            gene_counts: GeneCountsConfig::default(),
        }
    }

    pub fn with_reports(mut self, reports: impl Into<PathBuf>) -> Self {
        self.reports = Some(reports.into());
        self
    }
}

impl TryFrom<PathBuf> for PipelineConfig {
    type Error = ConstructionError;

    fn try_from(path: PathBuf) -> Result<Self, Self::Error> {
        if !path.is_file() {
            return Err(ConstructionError::NoConfigFileFound(path));
        }
        let config: PipelineConfig = ConfigLoader::load(&path)?;
        config.validate()?;
        Ok(config)
    }
}

#[derive(Debug, Deserialize, Serialize, Validate, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClassificationConfig {
    /// Copy number at or above which an amplification is called AMP rather than GAIN.
    #[serde(default = "default_amplification_threshold")]
    #[validate(range(min = 0.0))]
    pub amplification_threshold: f64,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            amplification_threshold: DEFAULT_AMPLIFICATION_THRESHOLD,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct OncoprintConfig {
    #[serde(default = "default_matrix_file_name")]
    #[validate(custom(function = "validate_file_name"))]
    pub file_name: String,
    /// Case-insensitive substring of the submitted diagnosis.
    #[serde(default)]
    pub diagnosis_filter: Option<String>,
}

impl Default for OncoprintConfig {
    fn default() -> Self {
        Self {
            file_name: default_matrix_file_name(),
            diagnosis_filter: None,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct ClinicalConfig {
    #[serde(default = "default_clinical_file_name")]
    #[validate(custom(function = "validate_file_name"))]
    pub file_name: String,
}

impl Default for ClinicalConfig {
    fn default() -> Self {
        Self {
            file_name: default_clinical_file_name(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Validate, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct MutationMapConfig {
    /// Empty means every short variant goes into one `mutation_map.txt`.
    #[serde(default)]
    #[validate(custom(function = "validate_gene_names"))]
    pub genes: Vec<String>,
    #[serde(default)]
    pub one_file: bool,
}

#[derive(Debug, Deserialize, Serialize, Validate, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct GeneCountsConfig {
    #[serde(default = "default_gene_counts_file_name")]
    #[validate(custom(function = "validate_file_name"))]
    pub file_name: String,
}

impl Default for GeneCountsConfig {
    fn default() -> Self {
        Self {
            file_name: default_gene_counts_file_name(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_amplification_threshold() -> f64 {
    DEFAULT_AMPLIFICATION_THRESHOLD
}

fn default_matrix_file_name() -> String {
    "all.txt".to_string()
}

fn default_clinical_file_name() -> String {
    "clinical_data.txt".to_string()
}

fn default_gene_counts_file_name() -> String {
    "gene_counts.csv".to_string()
}
