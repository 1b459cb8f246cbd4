use crate::extract::report::Report;
use serde_json::{Value, json};

/// A report whose results payload is `payload`.
pub(crate) fn report_with_payload(report_id: &str, payload: Value) -> Report {
    Report::new(
        report_id,
        json!({"rr:ResultsReport": {"rr:ResultsPayload": payload}}),
    )
}

/// A report whose variant report section is `variant_report`.
pub(crate) fn report_with_variant_report(report_id: &str, variant_report: Value) -> Report {
    report_with_payload(report_id, json!({"variant-report": variant_report}))
}

/// Three reports: a fully altered lung case, a lung case with one fusion and
/// an unaltered breast case.
pub(crate) fn combined_reports() -> Value {
    json!({
        "ORD-1.xml": {"rr:ResultsReport": {"rr:ResultsPayload": {
            "FinalReport": {"PMI": {
                "DOB": "2000-01-01",
                "CollDate": "2020-01-02",
                "SubmittedDiagnosis": "Lung Adenocarcinoma"
            }},
            "variant-report": {
                "short-variants": {"short-variant": [
                    {
                        "@gene": "TP53",
                        "@functional-effect": "missense",
                        "@status": "known",
                        "@protein-effect": "R175H",
                        "@cds-effect": "524G>A",
                        "@position": "chr17:7578406",
                        "dna-evidence": {"@sample": "SA-1"}
                    },
                    {
                        "@gene": "KRAS",
                        "@functional-effect": "missense",
                        "@status": "likely",
                        "@protein-effect": "G12C",
                        "@cds-effect": "34G>T",
                        "@position": "chr12:25398285",
                        "dna-evidence": [{"@sample": "SA-1"}, {"@sample": "SA-2"}]
                    }
                ]},
                "copy-number-alterations": {"copy-number-alteration": {
                    "@gene": "ERBB2",
                    "@type": "amplification",
                    "@copy-number": "12"
                }},
                "biomarkers": {"tumor-mutation-burden": {"@score": "11.35", "@unit": "Muts/Mb"}}
            }
        }}},
        "ORD-2.xml": {"rr:ResultsReport": {"rr:ResultsPayload": {
            "FinalReport": {"PMI": {
                "DOB": "1970-05-04",
                "CollDate": "2020-01-01",
                "SubmittedDiagnosis": "Lung Adeno"
            }},
            "variant-report": {
                "rearrangements": {"rearrangement": {
                    "@targeted-gene": "ALK",
                    "@other-gene": "EML4",
                    "@description": "EML4-ALK fusion"
                }}
            }
        }}},
        "ORD-3.xml": {"rr:ResultsReport": {"rr:ResultsPayload": {
            "FinalReport": {"PMI": {"SubmittedDiagnosis": "Breast Carcinoma"}},
            "variant-report": {}
        }}}
    })
}
