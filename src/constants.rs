pub const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d", // Date only
    "%Y.%m.%d", // Date only
    "%m/%d/%Y", // US date format
    "%d-%m-%Y", // European date format
    "%d.%m.%Y", // European date format
    "%Y",       // Year only
];

pub const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",         // e.g., 2025-09-04 11:00:59
    "%Y-%m-%dT%H:%M:%S",         // e.g., 2025-09-04T11:00:59
    "%Y-%m-%d %H:%M:%S%.f",      // With fractional seconds
    "%Y-%m-%dT%H:%M:%S%.f",      // With fractional seconds
    "%a, %d %b %Y %H:%M:%S GMT", // RFC 822 format
    "%+",                        // RFC 3339 / ISO 8601 format
];

pub const REPORT_ID: &str = "report_id";
pub const EVIDENCE_SAMPLE: &str = "dna_evidence_sample";
pub const NOT_AVAILABLE: &str = "N/A";

// Attribute columns of the flat alteration tables.
pub const GENE: &str = "@gene";
pub const FUNCTIONAL_EFFECT: &str = "@functional-effect";
pub const PROTEIN_EFFECT: &str = "@protein-effect";
pub const CDS_EFFECT: &str = "@cds-effect";
pub const POSITION: &str = "@position";
pub const STATUS: &str = "@status";
pub const COPY_NUMBER: &str = "@copy-number";
pub const CNA_TYPE: &str = "@type";
pub const DESCRIPTION: &str = "@description";
pub const OTHER_GENE: &str = "@other-gene";
pub const TARGETED_GENE: &str = "@targeted-gene";

// Element columns of the patient medical information table.
pub const DATE_OF_BIRTH: &str = "DOB";
pub const COLLECTION_DATE: &str = "CollDate";
pub const SUBMITTED_DIAGNOSIS: &str = "SubmittedDiagnosis";

pub const DRIVER_STATUSES: &[&str] = &["known", "likely"];
pub const DEFAULT_AMPLIFICATION_THRESHOLD: f64 = 8.0;
pub const DIAGNOSIS_PREFIX_LEN: usize = 4;
pub const DAYS_PER_YEAR: f64 = 365.25;
