//! Output target resolution

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// File name used when the output target is a directory.
pub const DEFAULT_FILENAME: &str = "model.xpck";

/// Where an experiment artifact is written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum OutputTarget {
    /// Write exactly to this path.
    File(PathBuf),
    /// Write `model.xpck` inside this directory.
    Directory(PathBuf),
}

impl OutputTarget {
    /// Classify a user-supplied path.
    ///
    /// An existing directory becomes [`OutputTarget::Directory`]; anything
    /// else (including a path that does not exist yet) is a file.
    #[must_use]
    pub fn resolve(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        if path.is_dir() {
            Self::Directory(path)
        } else {
            Self::File(path)
        }
    }

    /// Final artifact path.
    #[must_use]
    pub fn artifact_path(&self) -> PathBuf {
        match self {
            Self::File(path) => path.clone(),
            Self::Directory(dir) => dir.join(DEFAULT_FILENAME),
        }
    }
}
