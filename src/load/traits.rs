use crate::load::error::LoadError;
use std::fmt::Debug;
use std::io::Write;
use std::path::PathBuf;

/// A rendered output file.
pub trait Artifact: Debug {
    fn file_name(&self) -> String;

    /// Number of data rows, headers excluded.
    fn row_count(&self) -> usize;

    fn write_to(&self, writer: &mut dyn Write) -> Result<(), LoadError>;
}

pub trait Loadable: Debug {
    /// Stores the artifact and returns where it ended up.
    fn load(&self, artifact: &dyn Artifact) -> Result<PathBuf, LoadError>;
}
