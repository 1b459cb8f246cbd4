use crate::load::error::LoadError;
use crate::load::traits::Artifact;
use crate::transform::gene_counts::GeneCounts;
use polars::prelude::{Column, CsvWriter, DataFrame, SerWriter};
use std::io::Write;

const GENE_NAME: &str = "gene_name";
const COUNTS: &str = "counts";

/// Gene counts as a two-column CSV.
#[derive(Debug)]
pub struct GeneCountsCsv<'a> {
    file_name: String,
    counts: &'a GeneCounts,
}

impl<'a> GeneCountsCsv<'a> {
    pub fn new(file_name: impl Into<String>, counts: &'a GeneCounts) -> Self {
        Self {
            file_name: file_name.into(),
            counts,
        }
    }
}

impl Artifact for GeneCountsCsv<'_> {
    fn file_name(&self) -> String {
        self.file_name.clone()
    }

    fn row_count(&self) -> usize {
        self.counts.len()
    }

    fn write_to(&self, writer: &mut dyn Write) -> Result<(), LoadError> {
        let (genes, counts): (Vec<&str>, Vec<u64>) = self
            .counts
            .counts()
            .iter()
            .map(|(gene, count)| (gene.as_str(), *count as u64))
            .unzip();
        let mut data = DataFrame::new(vec![
            Column::new(GENE_NAME.into(), genes),
            Column::new(COUNTS.into(), counts),
        ])?;
        CsvWriter::new(writer)
            .include_header(true)
            .finish(&mut data)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    fn test_write_gene_counts() {
        let counts = GeneCounts::tally(["TP53", "KRAS", "TP53"]);
        let mut buffer = Vec::new();

        GeneCountsCsv::new("gene_counts.csv", &counts)
            .write_to(&mut buffer)
            .unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "gene_name,counts\nTP53,2\nKRAS,1\n"
        );
    }
}
