use crate::extract::csv_table::read_flat_table;
use crate::extract::error::ExtractionError;
use crate::extract::flat_record::FlatTable;
use log::{debug, warn};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use strum_macros::{Display, EnumIter};

/// The flat tables a run reads from or writes to its data directory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum TableKind {
    PatientMedicalInfo,
    ShortVariants,
    CopyNumberAlterations,
    Rearrangements,
    TumorMutationBurden,
    MicrosatelliteInstability,
}

impl TableKind {
    pub fn file_name(&self) -> String {
        format!("{self}.csv")
    }
}

/// Explicit access to the flat tables of one data directory.
///
/// Tables are read lazily on first use and kept until invalidated. Handing the
/// context to every step replaces any process-wide table cache.
#[derive(Debug, Default)]
pub struct DataContext {
    data_dir: PathBuf,
    tables: HashMap<TableKind, Arc<FlatTable>>,
}

impl DataContext {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
            tables: HashMap::new(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn path_of(&self, kind: TableKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    /// Returns the table, reading it from disk if it is not cached yet.
    pub fn load(&mut self, kind: TableKind) -> Result<Arc<FlatTable>, ExtractionError> {
        if let Some(table) = self.tables.get(&kind) {
            debug!("Using cached table {kind}");
            return Ok(table.clone());
        }
        let table = Arc::new(read_flat_table(&self.path_of(kind), &kind.to_string())?);
        self.tables.insert(kind, table.clone());
        Ok(table)
    }

    /// Like [`DataContext::load`], but a missing file is not an error.
    pub fn load_optional(
        &mut self,
        kind: TableKind,
    ) -> Result<Option<Arc<FlatTable>>, ExtractionError> {
        match self.load(kind) {
            Ok(table) => Ok(Some(table)),
            Err(ExtractionError::MissingFile(path)) => {
                warn!("Table {kind} not found at {}. Continuing without it.", path.display());
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    /// Puts a freshly produced table into the cache, replacing an older copy.
    pub fn insert(&mut self, kind: TableKind, table: FlatTable) -> Arc<FlatTable> {
        let table = Arc::new(table);
        self.tables.insert(kind, table.clone());
        table
    }

    pub fn is_loaded(&self, kind: TableKind) -> bool {
        self.tables.contains_key(&kind)
    }

    /// Drops the cached copy so the next load reads the file again.
    pub fn invalidate(&mut self, kind: TableKind) -> bool {
        self.tables.remove(&kind).is_some()
    }

    pub fn invalidate_all(&mut self) {
        self.tables.clear();
    }
}
