pub mod aggregator;
pub mod classifier;
pub mod error;
pub mod gene_counts;
pub mod notation;
pub mod parsing;

pub use aggregator::{PatientAggregator, PatientSummary};
pub use classifier::{Classification, CnaClassifier};
pub use gene_counts::GeneCounts;
