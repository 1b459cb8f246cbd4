use crate::extract::flat_record::FlatRecord;
use crate::extract::report::Report;

/// A section of a report that can be extracted into flat records.
pub trait Extractable: std::fmt::Debug {
    /// Name of the flat table this section produces, e.g. `short_variants`.
    fn table_name(&self) -> &str;

    /// Flattens the section of a single report. A missing section yields no records.
    fn extract_report(&self, report: &Report) -> Vec<FlatRecord>;
}
