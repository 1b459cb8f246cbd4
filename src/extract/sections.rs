use crate::constants::REPORT_ID;
use crate::extract::flat_record::FlatRecord;
use crate::extract::nested::{NestedNode, flatten_collection, render_value};
use crate::extract::report::Report;
use crate::extract::traits::Extractable;
use log::info;
use serde_json::Value;
use strum_macros::{Display, EnumIter};

const RESULTS_PAYLOAD: &[&str] = &["rr:ResultsReport", "rr:ResultsPayload"];
const VARIANT_REPORT: &str = "variant-report";
const FINAL_REPORT: &str = "FinalReport";
const PMI: &str = "PMI";
const BIOMARKERS: &str = "biomarkers";

fn payload_path(rest: &[&'static str]) -> Vec<&'static str> {
    RESULTS_PAYLOAD.iter().chain(rest).copied().collect()
}

/// The repeated alteration collections of the variant report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum AlterationCategory {
    #[strum(to_string = "short variants")]
    ShortVariant,
    #[strum(to_string = "copy number alterations")]
    CopyNumberAlteration,
    #[strum(to_string = "rearrangements")]
    Rearrangement,
}

impl AlterationCategory {
    /// Container element and repeated child element.
    fn elements(&self) -> (&'static str, &'static str) {
        match self {
            AlterationCategory::ShortVariant => ("short-variants", "short-variant"),
            AlterationCategory::CopyNumberAlteration => {
                ("copy-number-alterations", "copy-number-alteration")
            }
            AlterationCategory::Rearrangement => ("rearrangements", "rearrangement"),
        }
    }
}

impl Extractable for AlterationCategory {
    fn table_name(&self) -> &str {
        match self {
            AlterationCategory::ShortVariant => "short_variants",
            AlterationCategory::CopyNumberAlteration => "copy_number_alterations",
            AlterationCategory::Rearrangement => "rearrangements",
        }
    }

    fn extract_report(&self, report: &Report) -> Vec<FlatRecord> {
        let (container, element) = self.elements();
        let path = payload_path(&[VARIANT_REPORT, container, element]);
        let node = report.section(&path);
        if node.is_none() {
            info!("No {self} data found in report {}", report.id());
        }
        flatten_collection(report.id(), node)
    }
}

/// The patient medical information block of the final report. One record per report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PatientMedicalInfo;

impl Extractable for PatientMedicalInfo {
    fn table_name(&self) -> &str {
        "patient_medical_info"
    }

    fn extract_report(&self, report: &Report) -> Vec<FlatRecord> {
        let path = payload_path(&[FINAL_REPORT, PMI]);
        let Some(pmi) = report
            .section(&path)
            .and_then(Value::as_object)
            .filter(|pmi| !pmi.is_empty())
        else {
            info!("No patient medical information data found in report {}", report.id());
            return vec![];
        };

        let mut record = FlatRecord::new(report.id());
        for (key, value) in pmi {
            let text = render_value(value);
            if !text.is_empty() && key != REPORT_ID {
                record.insert(key.as_str(), text);
            }
        }
        vec![record]
    }
}

/// Single-value biomarker blocks. Attribute names lose their leading `@`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
pub enum Biomarker {
    #[strum(to_string = "tumor mutation burden")]
    TumorMutationBurden,
    #[strum(to_string = "microsatellite instability")]
    MicrosatelliteInstability,
}

impl Biomarker {
    fn element(&self) -> &'static str {
        match self {
            Biomarker::TumorMutationBurden => "tumor-mutation-burden",
            Biomarker::MicrosatelliteInstability => "microsatellite-instability",
        }
    }
}

impl Extractable for Biomarker {
    fn table_name(&self) -> &str {
        match self {
            Biomarker::TumorMutationBurden => "tumor_mutation_burden",
            Biomarker::MicrosatelliteInstability => "microsatellite_instability",
        }
    }

    fn extract_report(&self, report: &Report) -> Vec<FlatRecord> {
        let path = payload_path(&[VARIANT_REPORT, BIOMARKERS, self.element()]);
        let node = NestedNode::from(report.section(&path));
        if node.is_absent() {
            info!("No {self} data found in report {}", report.id());
        }
        node.into_records()
            .into_iter()
            .map(|item| {
                let mut record = FlatRecord::new(report.id());
                for (key, value) in item {
                    record.insert(key.trim_start_matches('@'), render_value(value));
                }
                record
            })
            .collect()
    }
}
