use crate::constants::{
    CDS_EFFECT, COLLECTION_DATE, CNA_TYPE, COPY_NUMBER, DATE_OF_BIRTH, DESCRIPTION,
    FUNCTIONAL_EFFECT, GENE, OTHER_GENE, POSITION, PROTEIN_EFFECT, STATUS,
    SUBMITTED_DIAGNOSIS, TARGETED_GENE,
};
use crate::extract::flat_record::{FlatRecord, FlatTable};

pub(crate) fn patient(
    report_id: &str,
    date_of_birth: Option<&str>,
    collection_date: Option<&str>,
    diagnosis: Option<&str>,
) -> FlatRecord {
    let mut record = FlatRecord::new(report_id);
    for (key, value) in [
        (DATE_OF_BIRTH, date_of_birth),
        (COLLECTION_DATE, collection_date),
        (SUBMITTED_DIAGNOSIS, diagnosis),
    ] {
        if let Some(value) = value {
            record.insert(key, value);
        }
    }
    record
}

/// ORD-1 and ORD-2 are lung cases, ORD-3 has no dates and no alterations.
pub(crate) fn patient_table() -> FlatTable {
    FlatTable::new(
        "patient_medical_info",
        vec![
            patient(
                "ORD-1",
                Some("2000-01-01"),
                Some("2020-01-02"),
                Some("Lung Adenocarcinoma"),
            ),
            patient(
                "ORD-2",
                Some("1970-05-04"),
                Some("2020-01-01"),
                Some("Lung Adeno"),
            ),
            patient("ORD-3", None, None, Some("Breast Carcinoma")),
        ],
    )
}

pub(crate) fn short_variant(
    report_id: &str,
    gene: &str,
    effect: &str,
    status: &str,
    protein_effect: &str,
    cds_effect: &str,
    position: &str,
) -> FlatRecord {
    FlatRecord::new(report_id)
        .with_field(GENE, gene)
        .with_field(FUNCTIONAL_EFFECT, effect)
        .with_field(STATUS, status)
        .with_field(PROTEIN_EFFECT, protein_effect)
        .with_field(CDS_EFFECT, cds_effect)
        .with_field(POSITION, position)
}

/// Three ORD-1 variants: two C>T channel substitutions and one insertion.
pub(crate) fn short_variant_table() -> FlatTable {
    FlatTable::new(
        "short_variants",
        vec![
            short_variant(
                "ORD-1",
                "TP53",
                "missense",
                "known",
                "R175H",
                "524G>A",
                "chr17:7578406",
            ),
            short_variant(
                "ORD-1",
                "TP53",
                "nonsense",
                "unknown",
                "R196*",
                "586C>T",
                "chr17:7578263",
            ),
            short_variant(
                "ORD-1",
                "ERBB2",
                "nonframeshift",
                "likely",
                "Y772_A775dup",
                "2313_2324insATACGTGATGGC",
                "badposition",
            ),
        ],
    )
}

pub(crate) fn rearrangement_table() -> FlatTable {
    FlatTable::new(
        "rearrangements",
        vec![
            FlatRecord::new("ORD-2")
                .with_field(TARGETED_GENE, "ALK")
                .with_field(OTHER_GENE, "EML4")
                .with_field(DESCRIPTION, "EML4-ALK fusion"),
        ],
    )
}

pub(crate) fn copy_number_table() -> FlatTable {
    FlatTable::new(
        "copy_number_alterations",
        vec![
            FlatRecord::new("ORD-1")
                .with_field(GENE, "ERBB2")
                .with_field(CNA_TYPE, "amplification")
                .with_field(COPY_NUMBER, "12"),
            FlatRecord::new("ORD-2")
                .with_field(GENE, "CDKN2A")
                .with_field(CNA_TYPE, "loss")
                .with_field(COPY_NUMBER, "0"),
        ],
    )
}
