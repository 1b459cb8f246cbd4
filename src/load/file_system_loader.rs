use crate::load::error::LoadError;
use crate::load::traits::{Artifact, Loadable};
use log::{debug, info};
use serde::Deserialize;
use std::fs;
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// A loader that stores artifacts as files in a local directory.
#[derive(Debug, Clone, Deserialize)]
pub struct FileSystemLoader {
    /// The directory the artifacts are written to.
    out_path: PathBuf,
    /// If true will create the full out path
    create_dir: bool,
}

impl FileSystemLoader {
    pub fn new(out_path: PathBuf, create_dir: bool) -> Self {
        Self {
            out_path,
            create_dir,
        }
    }

    pub fn out_path(&self) -> &Path {
        &self.out_path
    }
}

impl Loadable for FileSystemLoader {
    /// Writes the artifact to `<out_path>/<file_name>`, replacing an older file.
    ///
    /// A missing output directory is an error unless `create_dir` is set.
    fn load(&self, artifact: &dyn Artifact) -> Result<PathBuf, LoadError> {
        if self.create_dir {
            fs::create_dir_all(&self.out_path).map_err(|err| LoadError::NoStorage {
                path: self.out_path.clone(),
                reason: err.to_string(),
            })?;
        }

        let path = self.out_path.join(artifact.file_name());
        let cant_store = |reason: String| LoadError::CantStore {
            artifact: path.display().to_string(),
            reason,
        };

        let file = File::create(&path).map_err(|err| cant_store(err.to_string()))?;
        debug!("Storing file to: {:?}", path);
        let mut writer = BufWriter::new(file);
        artifact.write_to(&mut writer).map_err(|err| cant_store(err.to_string()))?;
        writer.flush().map_err(|err| cant_store(err.to_string()))?;

        info!(
            "Wrote {} rows to {}",
            artifact.row_count(),
            path.display()
        );
        Ok(path)
    }
}
