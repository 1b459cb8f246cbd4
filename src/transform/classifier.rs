use crate::constants::{
    COPY_NUMBER, CNA_TYPE, DEFAULT_AMPLIFICATION_THRESHOLD, DESCRIPTION, DRIVER_STATUSES,
    FUNCTIONAL_EFFECT, NOT_AVAILABLE, OTHER_GENE, PROTEIN_EFFECT, STATUS, TARGETED_GENE,
};
use crate::extract::flat_record::FlatRecord;
use crate::transform::notation::AlleleChange;
use log::warn;
use regex::Regex;
use std::fmt::{Display, Formatter};
use std::sync::LazyLock;
use strum_macros::{Display, EnumIter};

static DISALLOWED_LABEL_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9_\-*:+.()/]").expect("Invalid label regex"));

const SPLICE_SITE_PREFIX: &str = "splice site ";
const DRIVER_SUFFIX: &str = "_DRIVER";
const CNA_TRACK_TYPE: &str = "CNA";
const AMPLIFICATION: &str = "amplification";
const LOSS: &str = "loss";

/// Oncoprint mutation classes of short variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum MutationClass {
    Missense,
    Trunc,
    Inframe,
    Splice,
    Promoter,
    Other,
}

const FUNCTIONAL_EFFECT_CLASSES: &[(&str, MutationClass)] = &[
    ("missense", MutationClass::Missense),
    ("nonsense", MutationClass::Trunc),
    ("nonframeshift", MutationClass::Inframe),
    ("inframe", MutationClass::Inframe),
    ("frameshift", MutationClass::Trunc),
    ("splice", MutationClass::Splice),
    ("promoter", MutationClass::Promoter),
];

impl MutationClass {
    /// Total lookup: unknown or missing effects fall into [`MutationClass::Other`].
    pub fn from_functional_effect(effect: Option<&str>) -> Self {
        effect
            .and_then(|effect| {
                FUNCTIONAL_EFFECT_CLASSES
                    .iter()
                    .find(|(known, _)| *known == effect)
                    .map(|(_, class)| *class)
            })
            .unwrap_or(MutationClass::Other)
    }
}

/// Mutation type labels of the validated mutation-map format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum MutationMapType {
    #[strum(to_string = "Missense_Mutation")]
    MissenseMutation,
    #[strum(to_string = "Nonsense_Mutation")]
    NonsenseMutation,
    #[strum(to_string = "In_Frame_Indel")]
    InFrameIndel,
    #[strum(to_string = "Frame_Shift_Indel")]
    FrameShiftIndel,
    #[strum(to_string = "Splice_Site")]
    SpliceSite,
    #[strum(to_string = "Promoter")]
    Promoter,
}

const FUNCTIONAL_EFFECT_MAP_TYPES: &[(&str, MutationMapType)] = &[
    ("missense", MutationMapType::MissenseMutation),
    ("nonsense", MutationMapType::NonsenseMutation),
    ("nonframeshift", MutationMapType::InFrameIndel),
    ("inframe", MutationMapType::InFrameIndel),
    ("frameshift", MutationMapType::FrameShiftIndel),
    ("splice", MutationMapType::SpliceSite),
    ("promoter", MutationMapType::Promoter),
];

impl MutationMapType {
    /// Unknown effects are reported as missense, the format's most generic label.
    pub fn from_functional_effect(effect: Option<&str>) -> Self {
        effect
            .and_then(|effect| {
                FUNCTIONAL_EFFECT_MAP_TYPES
                    .iter()
                    .find(|(known, _)| *known == effect)
                    .map(|(_, map_type)| *map_type)
            })
            .unwrap_or(MutationMapType::MissenseMutation)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "UPPERCASE")]
pub enum CopyNumberClass {
    Amp,
    Gain,
    HomDel,
    HetLoss,
}

/// The controlled vocabulary written into the TYPE column of an oncoprint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlterationType {
    Mutation { class: MutationClass, driver: bool },
    CopyNumber(CopyNumberClass),
    Fusion,
}

impl AlterationType {
    /// Copy-number events share one track type, their class goes into the label.
    pub fn track_type(&self) -> String {
        match self {
            AlterationType::CopyNumber(_) => CNA_TRACK_TYPE.to_string(),
            other => other.to_string(),
        }
    }
}

impl Display for AlterationType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            AlterationType::Mutation { class, driver } => {
                write!(f, "{class}")?;
                if *driver {
                    write!(f, "{DRIVER_SUFFIX}")?;
                }
                Ok(())
            }
            AlterationType::CopyNumber(class) => write!(f, "{class}"),
            AlterationType::Fusion => write!(f, "FUSION"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub label: String,
    pub alteration_type: AlterationType,
}

impl Classification {
    pub fn new(label: impl Into<String>, alteration_type: AlterationType) -> Self {
        Self {
            label: label.into(),
            alteration_type,
        }
    }
}

/// Makes a protein effect safe as a single oncoprint token.
pub fn sanitize_label(text: &str) -> String {
    scrub(text.strip_prefix(SPLICE_SITE_PREFIX).unwrap_or(text))
}

fn scrub(text: &str) -> String {
    DISALLOWED_LABEL_CHARS
        .replace_all(&text.replace(' ', "_"), "")
        .into_owned()
}

pub fn is_driver(status: Option<&str>) -> bool {
    status.is_some_and(|status| DRIVER_STATUSES.iter().any(|known| *known == status))
}

pub fn classify_short_variant(record: &FlatRecord) -> Classification {
    let alteration_type = AlterationType::Mutation {
        class: MutationClass::from_functional_effect(record.get(FUNCTIONAL_EFFECT)),
        driver: is_driver(record.get(STATUS)),
    };
    let label = record
        .get(PROTEIN_EFFECT)
        .map(sanitize_label)
        .unwrap_or_default();
    Classification::new(label, alteration_type)
}

/// Rearrangements are always fusions and never carry the driver suffix.
pub fn classify_rearrangement(record: &FlatRecord) -> Classification {
    let partner = record
        .get(OTHER_GENE)
        .filter(|other| *other != NOT_AVAILABLE);
    let label = match partner {
        Some(other) => format!(
            "{other}-{}_fusion",
            record.get(TARGETED_GENE).unwrap_or_default()
        ),
        None => record.get(DESCRIPTION).map(scrub).unwrap_or_default(),
    };
    Classification::new(label, AlterationType::Fusion)
}

/// Copy-number classification with an observable fallback for unknown event types.
#[derive(Debug, Clone, PartialEq)]
pub struct CnaClassifier {
    amplification_threshold: f64,
    fallbacks: usize,
}

impl Default for CnaClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_AMPLIFICATION_THRESHOLD)
    }
}

impl CnaClassifier {
    pub fn new(amplification_threshold: f64) -> Self {
        Self {
            amplification_threshold,
            fallbacks: 0,
        }
    }

    pub fn classify(&mut self, record: &FlatRecord) -> Classification {
        let copy_number = record
            .get(COPY_NUMBER)
            .and_then(|value| value.trim().parse::<f64>().ok());

        let class = match record.get(CNA_TYPE) {
            Some(AMPLIFICATION) => match copy_number {
                Some(copies) if copies >= self.amplification_threshold => CopyNumberClass::Amp,
                _ => CopyNumberClass::Gain,
            },
            Some(LOSS) => match copy_number {
                Some(copies) if copies == 0.0 => CopyNumberClass::HomDel,
                _ => CopyNumberClass::HetLoss,
            },
            other => {
                self.fallbacks += 1;
                warn!(
                    "Unrecognised copy number alteration type {:?} in report {}. Defaulting to {}.",
                    other.unwrap_or_default(),
                    record.report_id(),
                    CopyNumberClass::Gain
                );
                CopyNumberClass::Gain
            }
        };

        Classification::new(class.to_string(), AlterationType::CopyNumber(class))
    }

    /// How many records fell through to the default class so far.
    pub fn fallback_count(&self) -> usize {
        self.fallbacks
    }
}

/// The six pyrimidine-reference substitution channels, in track order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum SpectrumChannel {
    CA,
    CG,
    CT,
    TA,
    TC,
    TG,
}

impl SpectrumChannel {
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Normalises a single-base substitution to the C/T reference strand.
    ///
    /// Indels, multi-base changes and non-ACGT bases are not part of the spectrum.
    pub fn from_allele_change(change: &AlleleChange) -> Option<Self> {
        let (reference, variant) = change.single_base()?;
        let (reference, variant) = match reference {
            'C' | 'T' => (reference, variant),
            'G' | 'A' => (complement(reference)?, complement(variant)?),
            _ => return None,
        };
        match (reference, variant) {
            ('C', 'A') => Some(SpectrumChannel::CA),
            ('C', 'G') => Some(SpectrumChannel::CG),
            ('C', 'T') => Some(SpectrumChannel::CT),
            ('T', 'A') => Some(SpectrumChannel::TA),
            ('T', 'C') => Some(SpectrumChannel::TC),
            ('T', 'G') => Some(SpectrumChannel::TG),
            _ => None,
        }
    }
}

impl Display for SpectrumChannel {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let (reference, variant) = match self {
            SpectrumChannel::CA => ('C', 'A'),
            SpectrumChannel::CG => ('C', 'G'),
            SpectrumChannel::CT => ('C', 'T'),
            SpectrumChannel::TA => ('T', 'A'),
            SpectrumChannel::TC => ('T', 'C'),
            SpectrumChannel::TG => ('T', 'G'),
        };
        write!(f, "{reference}>{variant}")
    }
}

fn complement(base: char) -> Option<char> {
    match base {
        'A' => Some('T'),
        'T' => Some('A'),
        'C' => Some('G'),
        'G' => Some('C'),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;
    use strum::IntoEnumIterator;

    fn variant(effect: &str, status: &str, protein_effect: &str) -> FlatRecord {
        FlatRecord::new("ORD-1")
            .with_field(FUNCTIONAL_EFFECT, effect)
            .with_field(STATUS, status)
            .with_field(PROTEIN_EFFECT, protein_effect)
    }

    #[rstest]
    #[case("missense", "unknown", "MISSENSE")]
    #[case("missense", "known", "MISSENSE_DRIVER")]
    #[case("nonsense", "likely", "TRUNC_DRIVER")]
    #[case("frameshift", "", "TRUNC")]
    #[case("nonframeshift", "", "INFRAME")]
    #[case("inframe", "", "INFRAME")]
    #[case("splice", "known", "SPLICE_DRIVER")]
    #[case("promoter", "", "PROMOTER")]
    #[case("synonymous", "", "OTHER")]
    #[case("", "likely", "OTHER_DRIVER")]
    fn test_classify_short_variant_type(
        #[case] effect: &str,
        #[case] status: &str,
        #[case] expected: &str,
    ) {
        let classification = classify_short_variant(&variant(effect, status, "R175H"));
        assert_eq!(classification.alteration_type.to_string(), expected);
        assert_eq!(classification.alteration_type.track_type(), expected);
    }

    #[rstest]
    fn test_mutation_vocabulary_is_closed() {
        let vocabulary: Vec<String> = MutationClass::iter()
            .flat_map(|class| {
                [false, true].map(|driver| AlterationType::Mutation { class, driver }.to_string())
            })
            .collect();

        for effect in [
            "missense",
            "nonsense",
            "nonframeshift",
            "inframe",
            "frameshift",
            "splice",
            "promoter",
            "synonymous",
            "MISSENSE",
            "stop gained",
            "",
        ] {
            for status in ["known", "likely", "unknown", ""] {
                let found = classify_short_variant(&variant(effect, status, "X"))
                    .alteration_type
                    .to_string();
                assert!(vocabulary.contains(&found), "{found} is not a known type");
            }
        }
    }

    #[rstest]
    #[case("splice site 672+1G>A", "672+1GA")]
    #[case("R175H", "R175H")]
    #[case("E746_A750del", "E746_A750del")]
    #[case("loss exons 2-5", "loss_exons_2-5")]
    #[case("T790M [p.(Thr790Met)]", "T790M_p.(Thr790Met)")]
    #[case("promoter -124C>T", "promoter_-124CT")]
    fn test_sanitize_label(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(sanitize_label(input), expected);
    }

    #[rstest]
    fn test_missing_protein_effect_gives_blank_label() {
        let record = FlatRecord::new("ORD-1").with_field(FUNCTIONAL_EFFECT, "missense");
        assert_eq!(classify_short_variant(&record).label, "");
    }

    #[rstest]
    #[case(Some("EML4"), "EML4-ALK_fusion")]
    #[case(Some("N/A"), "rearrangement_intron_19")]
    #[case(None, "rearrangement_intron_19")]
    fn test_classify_rearrangement(#[case] other_gene: Option<&str>, #[case] expected: &str) {
        let mut record = FlatRecord::new("ORD-1")
            .with_field(TARGETED_GENE, "ALK")
            .with_field(DESCRIPTION, "rearrangement intron 19");
        if let Some(other_gene) = other_gene {
            record.insert(OTHER_GENE, other_gene);
        }

        let classification = classify_rearrangement(&record);

        assert_eq!(classification.label, expected);
        assert_eq!(classification.alteration_type, AlterationType::Fusion);
        assert_eq!(classification.alteration_type.track_type(), "FUSION");
    }

    #[rstest]
    fn test_rearrangement_ignores_driver_status() {
        let record = FlatRecord::new("ORD-1")
            .with_field(TARGETED_GENE, "RET")
            .with_field(OTHER_GENE, "KIF5B")
            .with_field(STATUS, "known");

        assert_eq!(
            classify_rearrangement(&record).alteration_type.to_string(),
            "FUSION"
        );
    }

    #[rstest]
    #[case("amplification", "12", CopyNumberClass::Amp)]
    #[case("amplification", "8", CopyNumberClass::Amp)]
    #[case("amplification", "7.5", CopyNumberClass::Gain)]
    #[case("amplification", "", CopyNumberClass::Gain)]
    #[case("loss", "0", CopyNumberClass::HomDel)]
    #[case("loss", "1", CopyNumberClass::HetLoss)]
    #[case("loss", "", CopyNumberClass::HetLoss)]
    fn test_classify_copy_number(
        #[case] cna_type: &str,
        #[case] copy_number: &str,
        #[case] expected: CopyNumberClass,
    ) {
        let record = FlatRecord::new("ORD-1")
            .with_field(CNA_TYPE, cna_type)
            .with_field(COPY_NUMBER, copy_number);
        let mut classifier = CnaClassifier::default();

        let classification = classifier.classify(&record);

        assert_eq!(
            classification,
            Classification::new(expected.to_string(), AlterationType::CopyNumber(expected))
        );
        assert_eq!(classification.alteration_type.track_type(), "CNA");
        assert_eq!(classifier.fallback_count(), 0);
    }

    #[rstest]
    fn test_unknown_cna_type_falls_back_to_gain() {
        let mut classifier = CnaClassifier::new(6.0);
        let partial = FlatRecord::new("ORD-1")
            .with_field(CNA_TYPE, "partial amplification")
            .with_field(COPY_NUMBER, "20");
        let untyped = FlatRecord::new("ORD-2").with_field(COPY_NUMBER, "0");

        assert_eq!(classifier.classify(&partial).label, "GAIN");
        assert_eq!(classifier.classify(&untyped).label, "GAIN");
        assert_eq!(classifier.fallback_count(), 2);
    }

    #[rstest]
    fn test_threshold_is_configurable() {
        let record = FlatRecord::new("ORD-1")
            .with_field(CNA_TYPE, "amplification")
            .with_field(COPY_NUMBER, "6");

        assert_eq!(CnaClassifier::new(6.0).classify(&record).label, "AMP");
        assert_eq!(CnaClassifier::default().classify(&record).label, "GAIN");
    }

    #[rstest]
    #[case("C", "A", Some(SpectrumChannel::CA))]
    #[case("C", "T", Some(SpectrumChannel::CT))]
    #[case("T", "G", Some(SpectrumChannel::TG))]
    #[case("G", "A", Some(SpectrumChannel::CT))]
    #[case("G", "T", Some(SpectrumChannel::CA))]
    #[case("A", "G", Some(SpectrumChannel::TC))]
    #[case("A", "C", Some(SpectrumChannel::TG))]
    #[case("C", "C", None)]
    #[case("C", "N", None)]
    #[case("N", "A", None)]
    #[case("CC", "TT", None)]
    #[case("-", "A", None)]
    #[case("A", "-", None)]
    fn test_spectrum_channel(
        #[case] reference: &str,
        #[case] variant: &str,
        #[case] expected: Option<SpectrumChannel>,
    ) {
        assert_eq!(
            SpectrumChannel::from_allele_change(&AlleleChange::new(reference, variant)),
            expected
        );
    }

    #[rstest]
    fn test_channel_order_and_names() {
        let names: Vec<String> = SpectrumChannel::iter().map(|c| c.to_string()).collect();
        assert_eq!(names, vec!["C>A", "C>G", "C>T", "T>A", "T>C", "T>G"]);
        let indices: Vec<usize> = SpectrumChannel::iter().map(|c| c.index()).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4, 5]);
    }

    #[rstest]
    #[case(Some("frameshift"), MutationMapType::FrameShiftIndel)]
    #[case(Some("nonsense"), MutationMapType::NonsenseMutation)]
    #[case(Some("inframe"), MutationMapType::InFrameIndel)]
    #[case(Some("splice"), MutationMapType::SpliceSite)]
    #[case(Some("synonymous"), MutationMapType::MissenseMutation)]
    #[case(None, MutationMapType::MissenseMutation)]
    fn test_mutation_map_type(
        #[case] effect: Option<&str>,
        #[case] expected: MutationMapType,
    ) {
        assert_eq!(MutationMapType::from_functional_effect(effect), expected);
    }
}
