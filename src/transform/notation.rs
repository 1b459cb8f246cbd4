use std::fmt::{Display, Formatter};

/// Placeholder allele for the empty side of an insertion or deletion.
pub const INDEL_SENTINEL: &str = "-";

const CHROMOSOME_PREFIX: &str = "chr";
const INSERTION: &str = "ins";
const DELETION: &str = "del";
const SUBSTITUTION: char = '>';

/// A chromosomal location such as `chr16:23647362`, stored without the `chr` prefix.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GenomicPosition {
    pub chromosome: String,
    pub position: u64,
}

impl Display for GenomicPosition {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{CHROMOSOME_PREFIX}{}:{}", self.chromosome, self.position)
    }
}

/// Reference and variant allele of a coding-sequence change.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct AlleleChange {
    pub reference: String,
    pub variant: String,
}

impl AlleleChange {
    pub fn new(reference: impl Into<String>, variant: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            variant: variant.into(),
        }
    }

    pub fn is_insertion(&self) -> bool {
        self.reference == INDEL_SENTINEL
    }

    pub fn is_deletion(&self) -> bool {
        self.variant == INDEL_SENTINEL
    }

    /// A one-base to one-base change, e.g. `C>T`.
    pub fn single_base(&self) -> Option<(char, char)> {
        let mut reference = self.reference.chars();
        let mut variant = self.variant.chars();
        match (
            reference.next(),
            reference.next(),
            variant.next(),
            variant.next(),
        ) {
            (Some(reference), None, Some(variant), None) => Some((reference, variant)),
            _ => None,
        }
    }
}

impl Display for AlleleChange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}>{}", self.reference, self.variant)
    }
}

/// Parses `chrN:POS`. Anything else, including a missing value, gives `None`.
pub fn parse_position(notation: Option<&str>) -> Option<GenomicPosition> {
    let notation = notation?.trim();
    let notation = notation
        .strip_prefix(CHROMOSOME_PREFIX)
        .unwrap_or(notation);

    let mut parts = notation.split(':');
    let (Some(chromosome), Some(position), None) = (parts.next(), parts.next(), parts.next())
    else {
        return None;
    };

    Some(GenomicPosition {
        chromosome: chromosome.to_string(),
        position: position.parse().ok()?,
    })
}

/// Parses a coding-sequence change into its alleles.
///
/// Insertions win over deletions and deletions win over substitutions, so
/// `5_6delinsAT` is an insertion of `AT`. Unsupported shapes give `None`.
pub fn parse_allele_change(notation: Option<&str>) -> Option<AlleleChange> {
    let notation = notation?.trim();
    if notation.is_empty() {
        return None;
    }

    if notation.contains(INSERTION) {
        let inserted = split_indel(notation, INSERTION)?;
        Some(AlleleChange::new(INDEL_SENTINEL, inserted))
    } else if notation.contains(DELETION) {
        let deleted = split_indel(notation, DELETION)?;
        Some(AlleleChange::new(deleted, INDEL_SENTINEL))
    } else if notation.contains(SUBSTITUTION) {
        let letters: String = notation
            .chars()
            .filter(|c| c.is_alphabetic() || *c == SUBSTITUTION)
            .collect();
        let mut alleles = letters.split(SUBSTITUTION);
        match (alleles.next(), alleles.next(), alleles.next()) {
            (Some(reference), Some(variant), None)
                if !reference.is_empty() && !variant.is_empty() =>
            {
                Some(AlleleChange::new(reference, variant))
            }
            _ => None,
        }
    } else {
        None
    }
}

/// Everything after the single marker. The position context before it is dropped.
fn split_indel<'a>(notation: &'a str, marker: &str) -> Option<&'a str> {
    let mut parts = notation.split(marker);
    match (parts.next(), parts.next(), parts.next()) {
        (Some(_), Some(bases), None) if !bases.is_empty() => Some(bases),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case("chr16:23647362", "16", 23647362)]
    #[case("chrX:1", "X", 1)]
    #[case("7:140453136", "7", 140453136)]
    fn test_parse_position(#[case] input: &str, #[case] chromosome: &str, #[case] position: u64) {
        assert_eq!(
            parse_position(Some(input)),
            Some(GenomicPosition {
                chromosome: chromosome.to_string(),
                position,
            })
        );
    }

    #[rstest]
    #[case(Some("badstring"))]
    #[case(Some("chr1:12:13"))]
    #[case(Some("chr1:abc"))]
    #[case(Some("chr1:-5"))]
    #[case(Some(""))]
    #[case(None)]
    fn test_parse_position_rejects(#[case] input: Option<&str>) {
        assert_eq!(parse_position(input), None);
    }

    #[rstest]
    fn test_position_display() {
        let position = parse_position(Some("chr16:23647362")).unwrap();
        assert_eq!(position.to_string(), "chr16:23647362");
    }

    #[rstest]
    #[case("505C>T", "C", "T")]
    #[case("638_639insTGGCGGGGG", "-", "TGGCGGGGG")]
    #[case("340_344delCCGGC", "CCGGC", "-")]
    #[case("340_344CCGGC>G", "CCGGC", "G")]
    #[case("1234_1235delinsAT", "-", "AT")]
    #[case("340_344delC>G", "C>G", "-")]
    #[case("10_11insA>G", "-", "A>G")]
    fn test_parse_allele_change(
        #[case] input: &str,
        #[case] reference: &str,
        #[case] variant: &str,
    ) {
        assert_eq!(
            parse_allele_change(Some(input)),
            Some(AlleleChange::new(reference, variant))
        );
    }

    #[rstest]
    #[case(Some("505C"))]
    #[case(Some("505C>T>A"))]
    #[case(Some("505>T"))]
    #[case(Some("12insAinsT"))]
    #[case(Some("340_344del"))]
    #[case(Some(""))]
    #[case(None)]
    fn test_parse_allele_change_rejects(#[case] input: Option<&str>) {
        assert_eq!(parse_allele_change(input), None);
    }

    #[rstest]
    fn test_indel_flags() {
        let insertion = parse_allele_change(Some("638_639insTGG")).unwrap();
        assert!(insertion.is_insertion());
        assert!(!insertion.is_deletion());
        assert_eq!(insertion.single_base(), None);

        let substitution = parse_allele_change(Some("505C>T")).unwrap();
        assert_eq!(substitution.single_base(), Some(('C', 'T')));
    }

    #[rstest]
    #[case("340_344delC>G")]
    #[case("10_11insA>G")]
    fn test_indel_marker_wins_over_substitution(#[case] input: &str) {
        let change = parse_allele_change(Some(input)).unwrap();

        assert!(change.is_insertion() || change.is_deletion());
        assert_eq!(change.single_base(), None);
        assert_eq!(
            crate::transform::classifier::SpectrumChannel::from_allele_change(&change),
            None
        );
    }
}
