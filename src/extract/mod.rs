pub mod csv_table;
pub mod data_context;
pub mod error;
pub mod flat_record;
pub mod nested;
pub mod report;
pub mod sections;
pub mod traits;

pub use data_context::{DataContext, TableKind};
pub use flat_record::{FlatRecord, FlatTable};
pub use report::{Report, ReportCollection};
