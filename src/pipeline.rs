use crate::config::PipelineConfig;
use crate::error::{ConstructionError, PipelineError};
use crate::extract::error::ExtractionError;
use crate::extract::sections::{AlterationCategory, Biomarker, PatientMedicalInfo};
use crate::extract::traits::Extractable;
use crate::extract::{DataContext, ReportCollection, TableKind};
use crate::load::traits::{Artifact, Loadable};
use crate::load::{
    AlterationTables, ClinicalTracks, FileSystemLoader, FlatCsv, GeneCountsCsv, GeneSelection,
    MutationMap, OncoprintMatrix,
};
use crate::transform::aggregator::select_patients;
use crate::transform::{CnaClassifier, GeneCounts, PatientAggregator};
use log::{error, info, warn};
use std::fs;
use std::path::PathBuf;
use strum::IntoEnumIterator;
use validator::Validate;

fn section_of(kind: TableKind) -> Box<dyn Extractable> {
    match kind {
        TableKind::PatientMedicalInfo => Box::new(PatientMedicalInfo),
        TableKind::ShortVariants => Box::new(AlterationCategory::ShortVariant),
        TableKind::CopyNumberAlterations => Box::new(AlterationCategory::CopyNumberAlteration),
        TableKind::Rearrangements => Box::new(AlterationCategory::Rearrangement),
        TableKind::TumorMutationBurden => Box::new(Biomarker::TumorMutationBurden),
        TableKind::MicrosatelliteInstability => Box::new(Biomarker::MicrosatelliteInstability),
    }
}

/// Turns report batches into flat tables and flat tables into oncoprint artifacts.
///
/// Flat tables go to the data directory, artifacts to the output loader.
#[derive(Debug)]
pub struct Pipeline {
    config: PipelineConfig,
    context: DataContext,
    table_loader: FileSystemLoader,
    artifact_loader: Box<dyn Loadable>,
}

impl Pipeline {
    pub fn new(config: PipelineConfig, artifact_loader: Box<dyn Loadable>) -> Self {
        Pipeline {
            context: DataContext::new(&config.data_dir),
            table_loader: FileSystemLoader::new(config.data_dir.clone(), true),
            artifact_loader,
            config,
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    pub fn context(&mut self) -> &mut DataContext {
        &mut self.context
    }

    /// Writes every non-empty flat table of the batch to the data directory.
    pub fn extract(&mut self, reports: &ReportCollection) -> Result<Vec<PathBuf>, PipelineError> {
        info!("Starting extraction of {} reports", reports.len());
        let mut written = Vec::new();
        for kind in TableKind::iter() {
            let table = reports.extract(section_of(kind).as_ref());
            if table.is_empty() {
                info!("No {kind} records found. Skipping {}", kind.file_name());
                self.context.invalidate(kind);
                continue;
            }
            written.push(self.table_loader.load(&FlatCsv::new(&table))?);
            self.context.insert(kind, table);
        }
        info!("Concluded extraction. Wrote {} tables", written.len());
        Ok(written)
    }

    /// Loads the configured report document and extracts it.
    pub fn extract_configured(&mut self) -> Result<Vec<PathBuf>, PipelineError> {
        let path = self.config.reports.clone().ok_or(PipelineError::NoReports)?;
        let reports = ReportCollection::from_path(&path)?;
        self.extract(&reports)
    }

    /// Writes the alteration matrix. Returns `None` when a diagnosis filter matches nobody.
    ///
    /// Without a filter the matrix is always written, even for an empty patient table.
    pub fn oncoprint(&mut self) -> Result<Option<PathBuf>, PipelineError> {
        let patients = self.context.load(TableKind::PatientMedicalInfo)?;
        let short_variants = self.context.load_optional(TableKind::ShortVariants)?;
        let rearrangements = self.context.load_optional(TableKind::Rearrangements)?;
        let cnas = self.context.load_optional(TableKind::CopyNumberAlterations)?;

        let filter = self.config.oncoprint.diagnosis_filter.as_deref();
        let scope = select_patients(&patients, filter)?;
        if let Some(filter) = filter
            && scope.is_empty()
        {
            info!("No patients match the diagnosis filter '{filter}'. No matrix written.");
            return Ok(None);
        }

        let tables = AlterationTables {
            short_variants: short_variants.as_deref(),
            rearrangements: rearrangements.as_deref(),
            copy_number_alterations: cnas.as_deref(),
        };
        let mut classifier = CnaClassifier::new(self.config.classification.amplification_threshold);
        let matrix = OncoprintMatrix::build(
            self.config.oncoprint.file_name.as_str(),
            &scope,
            tables,
            &mut classifier,
        );
        if classifier.fallback_count() > 0 {
            warn!(
                "{} copy number alterations had an unrecognised type and were called GAIN",
                classifier.fallback_count()
            );
        }
        Ok(Some(self.artifact_loader.load(&matrix)?))
    }

    /// Writes the clinical tracks. A report id listed twice in the patient table fails the artifact.
    pub fn clinical(&mut self) -> Result<PathBuf, PipelineError> {
        let patients = self.context.load(TableKind::PatientMedicalInfo)?;
        let short_variants = self.context.load_optional(TableKind::ShortVariants)?;
        let summaries = PatientAggregator.summarize(&patients, short_variants.as_deref())?;
        let tracks = ClinicalTracks::new(self.config.clinical.file_name.as_str(), summaries);
        Ok(self.artifact_loader.load(&tracks)?)
    }

    pub fn mutation_map(&mut self) -> Result<Vec<PathBuf>, PipelineError> {
        let short_variants = self.context.load(TableKind::ShortVariants)?;
        let selection = GeneSelection::new(
            self.config.mutation_map.genes.clone(),
            self.config.mutation_map.one_file,
        );
        MutationMap::build_all(&short_variants, &selection)
            .iter()
            .map(|map| self.artifact_loader.load(map).map_err(PipelineError::from))
            .collect()
    }

    /// Counts genes in the matrix previously written to the output directory.
    pub fn gene_counts(&self) -> Result<PathBuf, PipelineError> {
        let matrix_path = self.config.output_dir.join(&self.config.oncoprint.file_name);
        if !matrix_path.is_file() {
            return Err(ExtractionError::MissingFile(matrix_path).into());
        }
        let text = fs::read_to_string(&matrix_path).map_err(ExtractionError::from)?;
        let counts = GeneCounts::from_matrix_text(&text);
        info!(
            "Counted {} alterations across {} genes",
            counts.total(),
            counts.len()
        );
        let artifact = GeneCountsCsv::new(self.config.gene_counts.file_name.as_str(), &counts);
        Ok(self.artifact_loader.load(&artifact)?)
    }

    /// Extracts the configured reports, then produces every artifact.
    ///
    /// A failing artifact does not stop the others. All failures are reported at the end.
    pub fn run(&mut self) -> Result<(), PipelineError> {
        self.config.validate()?;
        if self.config.reports.is_some() {
            self.extract_configured()?;
        }

        let mut failed = Vec::new();
        let mut record = |name: &str, result: Result<(), PipelineError>| {
            if let Err(err) = result {
                error!("Could not produce {name}: {err}");
                failed.push(name.to_string());
            }
        };

        let matrix = self.oncoprint();
        let matrix_written = matches!(matrix, Ok(Some(_)));
        record(&self.config.oncoprint.file_name.clone(), matrix.map(|_| ()));
        record(&self.config.clinical.file_name.clone(), self.clinical().map(|_| ()));
        record("mutation map", self.mutation_map().map(|_| ()));
        if matrix_written {
            record(
                &self.config.gene_counts.file_name.clone(),
                self.gene_counts().map(|_| ()),
            );
        } else {
            info!("No oncoprint matrix written. Skipping gene counts.");
        }

        if failed.is_empty() {
            info!("Concluded run");
            Ok(())
        } else {
            Err(PipelineError::FailedArtifacts(failed))
        }
    }
}

impl TryFrom<PipelineConfig> for Pipeline {
    type Error = ConstructionError;

    fn try_from(config: PipelineConfig) -> Result<Self, Self::Error> {
        config.validate()?;
        let loader = FileSystemLoader::new(config.output_dir.clone(), config.create_dir);
        Ok(Pipeline::new(config, Box::new(loader)))
    }
}
