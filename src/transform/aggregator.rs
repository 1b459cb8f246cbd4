use crate::constants::{
    CDS_EFFECT, COLLECTION_DATE, DATE_OF_BIRTH, DAYS_PER_YEAR, DIAGNOSIS_PREFIX_LEN,
    SUBMITTED_DIAGNOSIS,
};
use crate::extract::flat_record::{FlatRecord, FlatTable};
use crate::transform::classifier::SpectrumChannel;
use crate::transform::error::TransformError;
use crate::transform::notation::parse_allele_change;
use crate::transform::parsing::parse_report_date;
use chrono::NaiveDate;
use log::{debug, info};
use ordermap::OrderMap;
use std::collections::{HashMap, HashSet};
use std::fmt::{Display, Formatter};
use strum::IntoEnumIterator;

/// Per-patient counts of the six substitution channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MutationSpectrum([u32; 6]);

impl MutationSpectrum {
    pub fn new(counts: [u32; 6]) -> Self {
        Self(counts)
    }

    pub fn increment(&mut self, channel: SpectrumChannel) {
        self.0[channel.index()] += 1;
    }

    pub fn count(&self, channel: SpectrumChannel) -> u32 {
        self.0[channel.index()]
    }

    pub fn counts(&self) -> [u32; 6] {
        self.0
    }

    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }
}

impl Display for MutationSpectrum {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let joined = SpectrumChannel::iter()
            .map(|channel| self.count(channel).to_string())
            .collect::<Vec<_>>()
            .join("/");
        write!(f, "{joined}")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PatientSummary {
    pub report_id: String,
    pub age: Option<i64>,
    pub diagnosis: Option<String>,
    pub alteration_count: usize,
    pub spectrum: MutationSpectrum,
}

/// Whole years between two dates, rounded half away from zero.
pub fn age_in_years(date_of_birth: NaiveDate, collection_date: NaiveDate) -> i64 {
    let days = (collection_date - date_of_birth).num_days() as f64;
    (days / DAYS_PER_YEAR).round() as i64
}

pub fn patient_age(patient: &FlatRecord) -> Option<i64> {
    let date_of_birth = patient.get(DATE_OF_BIRTH).and_then(parse_report_date);
    let collection_date = patient.get(COLLECTION_DATE).and_then(parse_report_date);
    match (date_of_birth, collection_date) {
        (Some(born), Some(collected)) => Some(age_in_years(born, collected)),
        _ => {
            debug!("No age for report {}", patient.report_id());
            None
        }
    }
}

/// Raw diagnoses that share a lowercase name prefix, with the label they unify to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiagnosisGroup {
    pub prefix: String,
    pub members: Vec<String>,
    pub label: String,
}

fn diagnosis_prefix(diagnosis: &str) -> Option<String> {
    if diagnosis.chars().count() < DIAGNOSIS_PREFIX_LEN {
        return None;
    }
    Some(
        diagnosis
            .chars()
            .take(DIAGNOSIS_PREFIX_LEN)
            .collect::<String>()
            .to_lowercase(),
    )
}

/// Groups diagnoses by prefix and elects the most frequent member as the label.
///
/// `diagnoses` holds one entry per patient row, so frequencies come from the
/// whole table. Ties go to the diagnosis seen first.
pub fn group_diagnoses<'a>(diagnoses: impl IntoIterator<Item = &'a str>) -> Vec<DiagnosisGroup> {
    let mut counts: OrderMap<&str, usize> = OrderMap::new();
    for diagnosis in diagnoses {
        *counts.entry(diagnosis).or_default() += 1;
    }

    let mut groups: OrderMap<String, Vec<(&str, usize)>> = OrderMap::new();
    for (diagnosis, count) in counts {
        if let Some(prefix) = diagnosis_prefix(diagnosis) {
            groups.entry(prefix).or_default().push((diagnosis, count));
        }
    }

    groups
        .into_iter()
        .filter_map(|(prefix, members)| {
            let mut label: Option<(&str, usize)> = None;
            for (diagnosis, count) in members.iter() {
                if label.is_none_or(|(_, best)| *count > best) {
                    label = Some((*diagnosis, *count));
                }
            }
            let (label, _) = label?;
            Some(DiagnosisGroup {
                prefix,
                members: members.iter().map(|(member, _)| member.to_string()).collect(),
                label: label.to_string(),
            })
        })
        .collect()
}

/// Maps every raw diagnosis to its unified label.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DiagnosisUnifier {
    labels: HashMap<String, String>,
}

impl DiagnosisUnifier {
    pub fn new(groups: &[DiagnosisGroup]) -> Self {
        let labels = groups
            .iter()
            .flat_map(|group| {
                group
                    .members
                    .iter()
                    .map(|member| (member.clone(), group.label.clone()))
            })
            .collect();
        Self { labels }
    }

    pub fn from_patients(patients: &FlatTable) -> Self {
        let groups = group_diagnoses(patients.iter().filter_map(|p| p.get(SUBMITTED_DIAGNOSIS)));
        Self::new(&groups)
    }

    /// Short diagnoses never join a group and come back unchanged.
    pub fn unify<'a>(&'a self, diagnosis: &'a str) -> &'a str {
        self.labels
            .get(diagnosis)
            .map(String::as_str)
            .unwrap_or(diagnosis)
    }
}

/// Report ids of the patient table, optionally restricted to a diagnosis.
///
/// The filter is a case-insensitive substring match on the submitted diagnosis.
pub fn select_patients<'a>(
    patients: &'a FlatTable,
    diagnosis_filter: Option<&str>,
) -> Result<Vec<&'a str>, TransformError> {
    let Some(filter) = diagnosis_filter else {
        return Ok(patients.report_ids());
    };
    if !patients.is_empty() && !patients.has_column(SUBMITTED_DIAGNOSIS) {
        return Err(TransformError::MissingColumn {
            table: patients.name().to_string(),
            column: SUBMITTED_DIAGNOSIS.to_string(),
        });
    }

    let filter = filter.to_lowercase();
    let mut seen = HashSet::new();
    let selected: Vec<&str> = patients
        .iter()
        .filter(|patient| {
            patient
                .get(SUBMITTED_DIAGNOSIS)
                .is_some_and(|diagnosis| diagnosis.to_lowercase().contains(&filter))
        })
        .map(FlatRecord::report_id)
        .filter(|id| seen.insert(*id))
        .collect();
    info!(
        "Found {} patients with diagnosis containing '{filter}'",
        selected.len()
    );
    Ok(selected)
}

/// Derives the clinical tracks of every patient.
#[derive(Debug, Default)]
pub struct PatientAggregator;

impl PatientAggregator {
    /// One summary per patient row, in patient-table order.
    ///
    /// Only short variants feed the mutation count and spectrum.
    pub fn summarize(
        &self,
        patients: &FlatTable,
        short_variants: Option<&FlatTable>,
    ) -> Result<Vec<PatientSummary>, TransformError> {
        let mut seen = HashSet::new();
        if let Some(duplicate) = patients
            .iter()
            .map(FlatRecord::report_id)
            .find(|id| !seen.insert(*id))
        {
            return Err(TransformError::DuplicateReport {
                table: patients.name().to_string(),
                report_id: duplicate.to_string(),
            });
        }

        let mut counts: HashMap<&str, usize> = HashMap::new();
        let mut spectra: HashMap<&str, MutationSpectrum> = HashMap::new();
        for variant in short_variants.into_iter().flatten() {
            *counts.entry(variant.report_id()).or_default() += 1;
            let spectrum = spectra.entry(variant.report_id()).or_default();
            if let Some(channel) = parse_allele_change(variant.get(CDS_EFFECT))
                .as_ref()
                .and_then(SpectrumChannel::from_allele_change)
            {
                spectrum.increment(channel);
            }
        }

        let unifier = DiagnosisUnifier::from_patients(patients);
        let summaries: Vec<PatientSummary> = patients
            .iter()
            .map(|patient| {
                let report_id = patient.report_id();
                PatientSummary {
                    report_id: report_id.to_string(),
                    age: patient_age(patient),
                    diagnosis: patient
                        .get(SUBMITTED_DIAGNOSIS)
                        .map(|diagnosis| unifier.unify(diagnosis).to_string()),
                    alteration_count: counts.get(report_id).copied().unwrap_or_default(),
                    spectrum: spectra.get(report_id).copied().unwrap_or_default(),
                }
            })
            .collect();

        info!("Summarised {} patients", summaries.len());
        Ok(summaries)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_suite::tables::{patient, patient_table, short_variant_table};
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case((2000, 1, 1), (2020, 1, 2), 20)]
    #[case((1970, 5, 4), (2020, 1, 1), 50)]
    #[case((2000, 1, 1), (2000, 7, 1), 0)]
    #[case((2000, 1, 1), (2000, 7, 2), 1)]
    fn test_age_in_years(
        #[case] born: (i32, u32, u32),
        #[case] collected: (i32, u32, u32),
        #[case] expected: i64,
    ) {
        let born = NaiveDate::from_ymd_opt(born.0, born.1, born.2).unwrap();
        let collected = NaiveDate::from_ymd_opt(collected.0, collected.1, collected.2).unwrap();
        assert_eq!(age_in_years(born, collected), expected);
    }

    #[rstest]
    fn test_patient_age_needs_both_dates() {
        assert_eq!(
            patient_age(&patient("ORD-1", Some("2000-01-01"), Some("2020-01-02"), None)),
            Some(20)
        );
        assert_eq!(
            patient_age(&patient("ORD-1", Some("2000-01-01"), None, None)),
            None
        );
        assert_eq!(
            patient_age(&patient("ORD-1", Some("yesterday"), Some("2020-01-02"), None)),
            None
        );
    }

    #[rstest]
    fn test_group_diagnoses_elects_most_frequent() {
        let diagnoses = [
            "Lung Adeno",
            "Lung Adenocarcinoma",
            "Lunger Disease",
            "Lung Adenocarcinoma",
            "Breast Carcinoma",
            "CUP",
        ];

        let groups = group_diagnoses(diagnoses);

        assert_eq!(
            groups,
            vec![
                DiagnosisGroup {
                    prefix: "lung".to_string(),
                    members: vec![
                        "Lung Adeno".to_string(),
                        "Lung Adenocarcinoma".to_string(),
                        "Lunger Disease".to_string()
                    ],
                    label: "Lung Adenocarcinoma".to_string(),
                },
                DiagnosisGroup {
                    prefix: "brea".to_string(),
                    members: vec!["Breast Carcinoma".to_string()],
                    label: "Breast Carcinoma".to_string(),
                },
            ]
        );
    }

    #[rstest]
    fn test_group_diagnoses_ties_go_to_first_seen() {
        let groups = group_diagnoses(["colon cancer", "Colorectal Carcinoma"]);
        assert_eq!(groups[0].label, "colon cancer");
    }

    #[rstest]
    fn test_unifier_keeps_short_diagnoses() {
        let unifier = DiagnosisUnifier::new(&group_diagnoses(["Lung Adeno", "CUP", "Lung"]));

        assert_eq!(unifier.unify("CUP"), "CUP");
        assert_eq!(unifier.unify("Lung"), "Lung Adeno");
        assert_eq!(unifier.unify("never seen"), "never seen");
    }

    #[rstest]
    fn test_select_patients_by_diagnosis() {
        let patients = patient_table();

        let all = select_patients(&patients, None).unwrap();
        let lung = select_patients(&patients, Some("LUNG")).unwrap();
        let none = select_patients(&patients, Some("melanoma")).unwrap();

        assert_eq!(all, vec!["ORD-1", "ORD-2", "ORD-3"]);
        assert_eq!(lung, vec!["ORD-1", "ORD-2"]);
        assert!(none.is_empty());
    }

    #[rstest]
    fn test_select_patients_without_diagnosis_column() {
        let patients = FlatTable::new(
            "patient_medical_info",
            vec![FlatRecord::new("ORD-1").with_field("DOB", "1970-01-01")],
        );

        let err = select_patients(&patients, Some("lung")).unwrap_err();

        assert!(matches!(err, TransformError::MissingColumn { .. }));
    }

    #[rstest]
    fn test_summarize() {
        let summaries = PatientAggregator
            .summarize(&patient_table(), Some(&short_variant_table()))
            .unwrap();

        assert_eq!(summaries.len(), 3);
        let first = &summaries[0];
        assert_eq!(first.report_id, "ORD-1");
        assert_eq!(first.age, Some(20));
        assert_eq!(first.diagnosis.as_deref(), Some("Lung Adenocarcinoma"));
        assert_eq!(first.alteration_count, 3);
        assert_eq!(first.spectrum.to_string(), "0/0/2/0/0/0");

        let unaltered = &summaries[2];
        assert_eq!(unaltered.alteration_count, 0);
        assert_eq!(unaltered.spectrum, MutationSpectrum::default());
        assert_eq!(unaltered.age, None);
    }

    #[rstest]
    fn test_summarize_without_variants() {
        let summaries = PatientAggregator.summarize(&patient_table(), None).unwrap();
        assert!(summaries.iter().all(|s| s.alteration_count == 0));
    }

    #[rstest]
    fn test_summarize_rejects_duplicate_patients() {
        let patients = FlatTable::new(
            "patient_medical_info",
            vec![FlatRecord::new("ORD-1"), FlatRecord::new("ORD-1")],
        );

        let err = PatientAggregator.summarize(&patients, None).unwrap_err();

        assert_eq!(
            err,
            TransformError::DuplicateReport {
                table: "patient_medical_info".to_string(),
                report_id: "ORD-1".to_string()
            }
        );
    }

    #[rstest]
    fn test_spectrum_display() {
        let mut spectrum = MutationSpectrum::default();
        spectrum.increment(SpectrumChannel::CT);
        spectrum.increment(SpectrumChannel::CT);
        spectrum.increment(SpectrumChannel::TG);

        assert_eq!(spectrum.to_string(), "0/0/2/0/0/1");
        assert_eq!(spectrum.total(), 3);
    }
}
