use log::debug;
use std::collections::HashMap;

/// Number of matrix rows per gene, most frequent first.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneCounts {
    counts: Vec<(String, usize)>,
}

impl GeneCounts {
    /// Counts gene names, ordered by descending count and then by name.
    pub fn tally<'a>(genes: impl IntoIterator<Item = &'a str>) -> Self {
        let mut by_gene: HashMap<&str, usize> = HashMap::new();
        for gene in genes {
            *by_gene.entry(gene).or_default() += 1;
        }

        let mut counts: Vec<(String, usize)> = by_gene
            .into_iter()
            .map(|(gene, count)| (gene.to_string(), count))
            .collect();
        counts.sort_by(|(gene_a, count_a), (gene_b, count_b)| {
            count_b.cmp(count_a).then_with(|| gene_a.cmp(gene_b))
        });
        Self { counts }
    }

    /// Counts the GENE column of a rendered oncoprint matrix.
    ///
    /// Sample-only rows have no gene and are skipped.
    pub fn from_matrix_text(text: &str) -> Self {
        Self::tally(text.lines().enumerate().filter_map(|(line_no, line)| {
            let gene = line.trim_end().split('\t').nth(1).filter(|g| !g.is_empty());
            if gene.is_none() {
                debug!("Line {} has no gene column", line_no + 1);
            }
            gene
        }))
    }

    pub fn counts(&self) -> &[(String, usize)] {
        &self.counts
    }

    pub fn get(&self, gene: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|(name, _)| name == gene)
            .map(|(_, count)| *count)
    }

    pub fn len(&self) -> usize {
        self.counts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    pub fn total(&self) -> usize {
        self.counts.iter().map(|(_, count)| count).sum()
    }
}
