use crate::constants::{CDS_EFFECT, FUNCTIONAL_EFFECT, GENE, POSITION, PROTEIN_EFFECT, STATUS};
use crate::extract::flat_record::{FlatRecord, FlatTable};
use crate::load::error::LoadError;
use crate::load::oncoprint::tsv_cell;
use crate::load::traits::Artifact;
use crate::transform::classifier::{MutationMapType, is_driver};
use crate::transform::notation::{parse_allele_change, parse_position};
use log::{debug, info};
use std::io::Write;

pub const MUTATION_MAP_COLUMNS: [&str; 11] = [
    "Hugo_Symbol",
    "Sample_ID",
    "Protein_Change",
    "Mutation_Type",
    "Chromosome",
    "Start_Position",
    "End_Position",
    "Reference_Allele",
    "Variant_Allele",
    "Validation_Status",
    "Mutation_Status",
];

const DEFAULT_FILE_NAME: &str = "mutation_map.txt";
const FILE_NAME_GENE_LIMIT: usize = 3;
const SOMATIC: &str = "Somatic";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MutationMapRow {
    pub gene: String,
    pub sample: String,
    pub protein_change: String,
    pub mutation_type: MutationMapType,
    pub chromosome: String,
    pub start: u64,
    pub end: u64,
    pub reference_allele: String,
    pub variant_allele: String,
    pub validated: bool,
}

impl MutationMapRow {
    /// Variants without parseable coordinates or alleles have no row.
    pub fn from_variant(variant: &FlatRecord) -> Option<Self> {
        let gene = variant.get(GENE)?;
        let Some(position) = parse_position(variant.get(POSITION)) else {
            debug!(
                "Dropping {gene} variant of report {} with position {:?}",
                variant.report_id(),
                variant.get(POSITION)
            );
            return None;
        };
        let Some(alleles) = parse_allele_change(variant.get(CDS_EFFECT)) else {
            debug!(
                "Dropping {gene} variant of report {} with coding change {:?}",
                variant.report_id(),
                variant.get(CDS_EFFECT)
            );
            return None;
        };

        Some(Self {
            gene: gene.to_string(),
            sample: variant.report_id().to_string(),
            protein_change: variant.get(PROTEIN_EFFECT).unwrap_or_default().to_string(),
            mutation_type: MutationMapType::from_functional_effect(variant.get(FUNCTIONAL_EFFECT)),
            chromosome: position.chromosome,
            start: position.position,
            end: position.position,
            reference_allele: alleles.reference,
            variant_allele: alleles.variant,
            validated: is_driver(variant.get(STATUS)),
        })
    }

    fn validation_status(&self) -> &'static str {
        if self.validated { "Valid" } else { "Unknown" }
    }
}

/// Which genes go into which mutation-map file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GeneSelection {
    /// Every short variant into one file.
    All,
    /// One file per gene.
    Separate(Vec<String>),
    /// All listed genes into one file named after them.
    Combined(Vec<String>),
}

impl GeneSelection {
    pub fn new(genes: Vec<String>, one_file: bool) -> Self {
        let genes: Vec<String> = genes
            .into_iter()
            .map(|gene| gene.trim().to_string())
            .filter(|gene| !gene.is_empty())
            .collect();
        match (genes.is_empty(), one_file) {
            (true, _) => GeneSelection::All,
            (false, true) => GeneSelection::Combined(genes),
            (false, false) => GeneSelection::Separate(genes),
        }
    }
}

/// Short variants in the validated mutation-map layout.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MutationMap {
    file_name: String,
    rows: Vec<MutationMapRow>,
}

impl MutationMap {
    pub fn new(file_name: impl Into<String>, rows: Vec<MutationMapRow>) -> Self {
        Self {
            file_name: file_name.into(),
            rows,
        }
    }

    /// Builds the maps for a gene selection.
    ///
    /// In separate mode a gene without any variant gets no file.
    pub fn build_all(variants: &FlatTable, selection: &GeneSelection) -> Vec<MutationMap> {
        match selection {
            GeneSelection::All => vec![Self::new(
                DEFAULT_FILE_NAME,
                variants.iter().filter_map(MutationMapRow::from_variant).collect(),
            )],
            GeneSelection::Separate(genes) => genes
                .iter()
                .filter_map(|gene| {
                    let rows = Self::for_genes(variants, std::slice::from_ref(gene))?;
                    Some(Self::new(format!("{gene}.txt"), rows))
                })
                .collect(),
            GeneSelection::Combined(genes) => {
                let rows = genes
                    .iter()
                    .filter_map(|gene| Self::for_genes(variants, std::slice::from_ref(gene)))
                    .flatten()
                    .collect();
                vec![Self::new(combined_file_name(genes), rows)]
            }
        }
    }

    /// Rows for the given genes, or `None` when no variant matches.
    fn for_genes(variants: &FlatTable, genes: &[String]) -> Option<Vec<MutationMapRow>> {
        let matching: Vec<&FlatRecord> = variants
            .iter()
            .filter(|variant| {
                variant
                    .get(GENE)
                    .is_some_and(|gene| genes.iter().any(|wanted| wanted == gene))
            })
            .collect();
        if matching.is_empty() {
            info!("No variants found for gene(s) {}", genes.join(", "));
            return None;
        }
        Some(
            matching
                .into_iter()
                .filter_map(MutationMapRow::from_variant)
                .collect(),
        )
    }

    pub fn rows(&self) -> &[MutationMapRow] {
        &self.rows
    }
}

/// `A_B_C.txt`, or `A_B_C_plus_N_more.txt` for longer gene lists.
pub fn combined_file_name(genes: &[String]) -> String {
    if genes.len() <= FILE_NAME_GENE_LIMIT {
        format!("{}.txt", genes.join("_"))
    } else {
        format!(
            "{}_plus_{}_more.txt",
            genes[..FILE_NAME_GENE_LIMIT].join("_"),
            genes.len() - FILE_NAME_GENE_LIMIT
        )
    }
}

impl Artifact for MutationMap {
    fn file_name(&self) -> String {
        self.file_name.clone()
    }

    fn row_count(&self) -> usize {
        self.rows.len()
    }

    fn write_to(&self, writer: &mut dyn Write) -> Result<(), LoadError> {
        writeln!(writer, "{}", MUTATION_MAP_COLUMNS.join("\t"))?;
        for row in &self.rows {
            writeln!(
                writer,
                "{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{}\t{SOMATIC}",
                tsv_cell(&row.gene),
                tsv_cell(&row.sample),
                tsv_cell(&row.protein_change),
                row.mutation_type,
                tsv_cell(&row.chromosome),
                row.start,
                row.end,
                tsv_cell(&row.reference_allele),
                tsv_cell(&row.variant_allele),
                row.validation_status(),
            )?;
        }
        Ok(())
    }
}
