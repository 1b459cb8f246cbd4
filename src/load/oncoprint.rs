use crate::constants::{GENE, NOT_AVAILABLE, TARGETED_GENE};
use crate::extract::flat_record::{FlatRecord, FlatTable};
use crate::load::error::LoadError;
use crate::load::traits::Artifact;
use crate::transform::aggregator::PatientSummary;
use crate::transform::classifier::{
    Classification, CnaClassifier, classify_rearrangement, classify_short_variant,
};
use log::{debug, info};
use std::borrow::Cow;
use std::collections::HashSet;
use std::io::Write;

pub const CLINICAL_HEADER: &str = "Sample\tAge(number)\tCancer_Type(string)\tMutation_Count(lognumber)\tMutation_Spectrum(C>A/C>G/C>T/T>A/T>C/T>G)";

/// Replaces tabs and line breaks so a free-text value stays within one tab-delimited cell.
pub(crate) fn tsv_cell(value: &str) -> Cow<'_, str> {
    if value.contains(['\t', '\n', '\r']) {
        Cow::Owned(value.replace(['\t', '\n', '\r'], " "))
    } else {
        Cow::Borrowed(value)
    }
}

/// One line of an oncoprint matrix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatrixRow {
    Alteration {
        sample: String,
        gene: String,
        label: String,
        track_type: String,
    },
    /// A sample without alterations, listed so it counts as unaltered.
    Sample(String),
}

impl MatrixRow {
    fn alteration(sample: &str, gene: &str, classification: Classification) -> Self {
        MatrixRow::Alteration {
            sample: sample.to_string(),
            gene: gene.to_string(),
            track_type: classification.alteration_type.track_type(),
            label: classification.label,
        }
    }

    pub fn sample(&self) -> &str {
        match self {
            MatrixRow::Alteration { sample, .. } | MatrixRow::Sample(sample) => sample,
        }
    }
}

/// The alteration tables feeding a matrix. Any of them may be missing.
#[derive(Debug, Clone, Copy, Default)]
pub struct AlterationTables<'a> {
    pub short_variants: Option<&'a FlatTable>,
    pub rearrangements: Option<&'a FlatTable>,
    pub copy_number_alterations: Option<&'a FlatTable>,
}

/// Alteration-by-sample matrix in the tab-delimited oncoprint layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct OncoprintMatrix {
    file_name: String,
    rows: Vec<MatrixRow>,
}

impl OncoprintMatrix {
    /// Builds the matrix for the samples in `scope`.
    ///
    /// Alterations are listed per category in the order short variants,
    /// rearrangements, copy-number alterations, each in table order. Samples in
    /// scope without any listed alteration follow as sample-only rows.
    pub fn build(
        file_name: impl Into<String>,
        scope: &[&str],
        tables: AlterationTables<'_>,
        cna_classifier: &mut CnaClassifier,
    ) -> Self {
        let in_scope: HashSet<&str> = scope.iter().copied().collect();
        let mut altered: HashSet<String> = HashSet::new();
        let mut rows = Vec::new();

        let mut emit = |record: &FlatRecord, gene_column: &str, classification: Classification| {
            let sample = record.report_id();
            if !in_scope.contains(sample) {
                return;
            }
            let Some(gene) = record.get(gene_column) else {
                debug!("Skipping alteration without gene in report {sample}");
                return;
            };
            if classification.label.is_empty() {
                debug!("Skipping {gene} alteration without label in report {sample}");
                return;
            }
            altered.insert(sample.to_string());
            rows.push(MatrixRow::alteration(sample, gene, classification));
        };

        for variant in tables.short_variants.into_iter().flatten() {
            emit(variant, GENE, classify_short_variant(variant));
        }
        for rearrangement in tables.rearrangements.into_iter().flatten() {
            emit(
                rearrangement,
                TARGETED_GENE,
                classify_rearrangement(rearrangement),
            );
        }
        for cna in tables.copy_number_alterations.into_iter().flatten() {
            if in_scope.contains(cna.report_id()) {
                emit(cna, GENE, cna_classifier.classify(cna));
            }
        }

        let alteration_rows = rows.len();
        let mut listed = HashSet::new();
        for sample in scope {
            if !altered.contains(*sample) && listed.insert(*sample) {
                rows.push(MatrixRow::Sample(sample.to_string()));
            }
        }
        info!(
            "Built oncoprint matrix with {alteration_rows} alterations and {} unaltered samples",
            rows.len() - alteration_rows
        );

        Self {
            file_name: file_name.into(),
            rows,
        }
    }

    pub fn rows(&self) -> &[MatrixRow] {
        &self.rows
    }
}

impl Artifact for OncoprintMatrix {
    fn file_name(&self) -> String {
        self.file_name.clone()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn write_to(&self, writer: &mut dyn Write) -> Result<(), LoadError> {
        for row in &self.rows {
            match row {
                MatrixRow::Alteration {
                    sample,
                    gene,
                    label,
                    track_type,
                } => writeln!(
                    writer,
                    "{}\t{}\t{}\t{track_type}",
                    tsv_cell(sample),
                    tsv_cell(gene),
                    tsv_cell(label)
                )?,
                MatrixRow::Sample(sample) => writeln!(writer, "{}", tsv_cell(sample))?,
            }
        }
        Ok(())
    }
}

/// Per-sample clinical tracks in the oncoprint layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClinicalTracks {
    file_name: String,
    summaries: Vec<PatientSummary>,
}

impl ClinicalTracks {
    pub fn new(file_name: impl Into<String>, summaries: Vec<PatientSummary>) -> Self {
        Self {
            file_name: file_name.into(),
            summaries,
        }
    }

    pub fn summaries(&self) -> &[PatientSummary] {
        &self.summaries
    }
}

impl Artifact for ClinicalTracks {
    fn file_name(&self) -> String {
        self.file_name.clone()
    }

    fn row_count(&self) -> usize {
        self.summaries.len()
    }

    fn write_to(&self, writer: &mut dyn Write) -> Result<(), LoadError> {
        writeln!(writer, "{CLINICAL_HEADER}")?;
        for summary in &self.summaries {
            let age = summary
                .age
                .map(|age| age.to_string())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            let diagnosis = summary.diagnosis.as_deref().unwrap_or(NOT_AVAILABLE);
            writeln!(
                writer,
                "{}\t{age}\t{}\t{}\t{}",
                tsv_cell(&summary.report_id),
                tsv_cell(diagnosis),
                summary.alteration_count,
                summary.spectrum
            )?;
        }
        Ok(())
    }
}
