use crate::constants::{EVIDENCE_SAMPLE, REPORT_ID};
use crate::extract::flat_record::FlatRecord;
use serde_json::{Map, Value};

pub const DNA_EVIDENCE: &str = "dna-evidence";
pub const SAMPLE_ATTRIBUTE: &str = "@sample";

/// The three shapes a repeated element takes after markup-to-tree conversion.
///
/// An element that occurs once becomes an object, an element that occurs several
/// times becomes a list, and an empty or missing element becomes nothing at all.
/// Every read of a nested collection goes through this type, so downstream code
/// only ever sees a list of objects.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NestedNode<'a> {
    Absent,
    Single(&'a Map<String, Value>),
    Many(&'a [Value]),
}

impl<'a> From<Option<&'a Value>> for NestedNode<'a> {
    fn from(value: Option<&'a Value>) -> Self {
        match value {
            Some(Value::Object(map)) => NestedNode::Single(map),
            Some(Value::Array(items)) => NestedNode::Many(items.as_slice()),
            _ => NestedNode::Absent,
        }
    }
}

impl<'a> NestedNode<'a> {
    pub fn is_absent(&self) -> bool {
        matches!(self, NestedNode::Absent)
    }

    /// Unwraps the node into a uniform list. Non-object list items are skipped.
    pub fn into_records(self) -> Vec<&'a Map<String, Value>> {
        match self {
            NestedNode::Absent => vec![],
            NestedNode::Single(map) => vec![map],
            NestedNode::Many(items) => items.iter().filter_map(Value::as_object).collect(),
        }
    }
}

/// Walks `path` through nested objects. A `null` anywhere along the way counts as absent.
pub fn descend<'a>(tree: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter()
        .try_fold(tree, |node, key| node.as_object()?.get(*key))
        .filter(|node| !node.is_null())
}

/// Renders a leaf of the tree as cell text. Nested structures are kept as JSON text.
pub fn render_value(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(text) => text.clone(),
        Value::Bool(_) | Value::Number(_) => value.to_string(),
        Value::Array(_) | Value::Object(_) => value.to_string(),
    }
}

/// Collapses the evidence sub-structure into one `;`-joined string of sample ids.
///
/// A single evidence object without a sample attribute yields `None`. A list always
/// yields a value, even if none of its items carried a sample.
pub fn collapse_evidence(evidence: &Value) -> Option<String> {
    match NestedNode::from(Some(evidence)) {
        NestedNode::Single(item) => item.get(SAMPLE_ATTRIBUTE).map(render_value),
        node @ NestedNode::Many(_) => Some(
            node.into_records()
                .into_iter()
                .filter_map(|item| item.get(SAMPLE_ATTRIBUTE))
                .map(render_value)
                .collect::<Vec<String>>()
                .join(";"),
        ),
        NestedNode::Absent => None,
    }
}

/// Flattens one alteration element into a record owned by `report_id`.
///
/// All keys pass through unchanged except the evidence sub-structure, which is
/// replaced by the collapsed sample string. A `report_id` inside the item is
/// dropped, so the record always belongs to `report_id`.
pub fn flatten_record(report_id: &str, item: &Map<String, Value>) -> FlatRecord {
    let mut record = FlatRecord::new(report_id);
    for (key, value) in item
        .iter()
        .filter(|(key, _)| key.as_str() != DNA_EVIDENCE && key.as_str() != REPORT_ID)
    {
        record.insert(key.as_str(), render_value(value));
    }
    if let Some(samples) = item.get(DNA_EVIDENCE).and_then(collapse_evidence) {
        record.insert(EVIDENCE_SAMPLE, samples);
    }
    record
}

/// Flattens an optional nested collection. Absence yields an empty list.
pub fn flatten_collection(report_id: &str, node: Option<&Value>) -> Vec<FlatRecord> {
    NestedNode::from(node)
        .into_records()
        .into_iter()
        .map(|item| flatten_record(report_id, item))
        .collect()
}
