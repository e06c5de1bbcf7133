//! Experiment Store - durable storage for experiment records
//!
//! Records are written to a temporary file next to the destination and
//! renamed into place, so a reader never sees a partially written artifact.
//! A new artifact gets the usual umask-filtered mode of a created file; an
//! overwritten one keeps the mode of the file it replaces.

use std::fs::{self, File, Permissions};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use super::{ExperimentRecord, OutputTarget};
use crate::Result;

/// Reads and writes `.xpck` experiment artifacts.
#[derive(Debug, Default, Clone, Copy)]
pub struct ExperimentStore;

impl ExperimentStore {
    /// Create a store.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Write `record` to `target`, replacing any existing file.
    ///
    /// Returns the path of the written artifact.
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the destination directory is not
    /// writable or the rename fails, and [`crate::Error::Serialization`] if
    /// the record cannot be encoded. The destination is untouched on error.
    pub fn save(&self, target: &OutputTarget, record: &ExperimentRecord) -> Result<PathBuf> {
        let path = target.artifact_path();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut tmp = create_temp(&dir)?;
        if let Ok(existing) = fs::metadata(&path) {
            tmp.as_file().set_permissions(existing.permissions())?;
        }
        {
            let mut writer = BufWriter::new(tmp.as_file_mut());
            serde_json::to_writer(&mut writer, record)?;
            writer.flush()?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&path).map_err(|e| e.error)?;

        tracing::info!(path = %path.display(), models = record.models().len(), "saved experiment");
        Ok(path)
    }

    /// Read a record written by [`ExperimentStore::save`].
    ///
    /// # Errors
    ///
    /// Returns [`crate::Error::Io`] if the file cannot be opened and
    /// [`crate::Error::Serialization`] if it is not a valid record.
    pub fn load(&self, path: &Path) -> Result<ExperimentRecord> {
        let file = File::open(path)?;
        Ok(serde_json::from_reader(BufReader::new(file))?)
    }
}

/// Temporary file in `dir` created with the default mode for new files.
fn create_temp(dir: &Path) -> std::io::Result<NamedTempFile> {
    let mut builder = tempfile::Builder::new();
    builder.prefix(".xpck");
    if let Some(permissions) = new_file_permissions() {
        builder.permissions(permissions);
    }
    builder.tempfile_in(dir)
}

#[cfg(unix)]
fn new_file_permissions() -> Option<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    // Masked by the process umask at creation, like a plain `File::create`.
    Some(Permissions::from_mode(0o666))
}

#[cfg(not(unix))]
const fn new_file_permissions() -> Option<Permissions> {
    None
}
