use crate::extract::error::ExtractionError;
use crate::extract::flat_record::FlatTable;
use crate::extract::nested::descend;
use crate::extract::traits::Extractable;
use log::info;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Derives the report identifier from the source file name by dropping the extension.
pub fn report_id_from_file_name(file_name: &str) -> String {
    Path::new(file_name)
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_else(|| file_name.to_string())
}

/// One patient's report as a generic nested tree.
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    id: String,
    tree: Value,
}

impl Report {
    pub fn new(id: impl Into<String>, tree: Value) -> Self {
        Self {
            id: id.into(),
            tree,
        }
    }

    pub fn from_file_name(file_name: &str, tree: Value) -> Self {
        Self::new(report_id_from_file_name(file_name), tree)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn tree(&self) -> &Value {
        &self.tree
    }

    pub fn section(&self, path: &[&str]) -> Option<&Value> {
        descend(&self.tree, path)
    }
}

/// All reports of a batch, in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ReportCollection {
    reports: Vec<Report>,
}

impl ReportCollection {
    pub fn new(reports: Vec<Report>) -> Self {
        Self { reports }
    }

    /// Builds the collection from a JSON object that maps report file names to trees.
    pub fn from_value(value: Value) -> Result<Self, ExtractionError> {
        match value {
            Value::Object(map) => Ok(Self::new(
                map.into_iter()
                    .map(|(file_name, tree)| Report::from_file_name(&file_name, tree))
                    .collect(),
            )),
            other => Err(ExtractionError::UnexpectedReportShape(
                json_kind(&other).to_string(),
            )),
        }
    }

    pub fn from_path(path: &Path) -> Result<Self, ExtractionError> {
        if !path.is_file() {
            return Err(ExtractionError::MissingFile(path.to_path_buf()));
        }
        info!("Loading reports from {}", path.display());
        let content = fs::read_to_string(path)?;
        let collection = Self::from_value(serde_json::from_str(&content)?)?;
        info!("Loaded {} reports", collection.len());
        Ok(collection)
    }

    pub fn reports(&self) -> &[Report] {
        &self.reports
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }

    /// Extracts one section from every report into a single flat table.
    pub fn extract(&self, section: &dyn Extractable) -> FlatTable {
        info!("Extracting {}", section.table_name());
        let records = self
            .reports
            .iter()
            .flat_map(|report| section.extract_report(report))
            .collect();
        FlatTable::new(section.table_name(), records)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "an object",
    }
}
