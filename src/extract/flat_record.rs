use crate::constants::REPORT_ID;
use ordermap::OrderMap;

/// A single flattened row: the owning report plus its named attributes.
///
/// Attribute values are stored as text. A blank value is kept, so the key still
/// takes part in column projection, but [`FlatRecord::get`] treats it as absent.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatRecord {
    report_id: String,
    fields: OrderMap<String, String>,
}

impl FlatRecord {
    pub fn new(report_id: impl Into<String>) -> Self {
        Self {
            report_id: report_id.into(),
            fields: OrderMap::new(),
        }
    }

    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts an attribute. The identifier column is never stored as an attribute.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        if key == REPORT_ID {
            self.report_id = value.into();
        } else {
            self.fields.insert(key, value.into());
        }
    }

    pub fn report_id(&self) -> &str {
        &self.report_id
    }

    /// Returns the attribute value, or `None` when it is missing or blank.
    pub fn get(&self, key: &str) -> Option<&str> {
        if key == REPORT_ID {
            return Some(self.report_id.as_str());
        }
        self.fields
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    /// The raw attribute value, including blanks. Used when serialising.
    pub fn raw(&self, key: &str) -> Option<&str> {
        if key == REPORT_ID {
            return Some(self.report_id.as_str());
        }
        self.fields.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        key == REPORT_ID || self.fields.contains_key(key)
    }

    /// Attribute keys in insertion order, without the identifier column.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// A named batch of flat records, kept in source order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FlatTable {
    name: String,
    records: Vec<FlatRecord>,
}

impl FlatTable {
    pub fn new(name: impl Into<String>, records: Vec<FlatRecord>) -> Self {
        Self {
            name: name.into(),
            records,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn records(&self) -> &[FlatRecord] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, FlatRecord> {
        self.records.iter()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn has_column(&self, key: &str) -> bool {
        self.records.iter().any(|record| record.contains_key(key))
    }

    /// Report identifiers in table order, duplicates removed.
    pub fn report_ids(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.records
            .iter()
            .map(FlatRecord::report_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

impl<'a> IntoIterator for &'a FlatTable {
    type Item = &'a FlatRecord;
    type IntoIter = std::slice::Iter<'a, FlatRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
