pub mod error;
pub mod file_system_loader;
pub mod flat_csv;
pub mod gene_counts_csv;
pub mod mutation_map;
pub mod oncoprint;
pub mod projector;
pub mod traits;

pub use file_system_loader::FileSystemLoader;
pub use flat_csv::FlatCsv;
pub use gene_counts_csv::GeneCountsCsv;
pub use mutation_map::{GeneSelection, MutationMap};
pub use oncoprint::{AlterationTables, ClinicalTracks, OncoprintMatrix};
