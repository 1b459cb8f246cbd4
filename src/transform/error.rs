use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum TransformError {
    #[error("Report '{report_id}' appears more than once in table '{table}'")]
    DuplicateReport { table: String, report_id: String },
    #[error("Table '{table}' has no column '{column}'")]
    MissingColumn { table: String, column: String },
}
