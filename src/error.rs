//! Error types for c2s-train
//!
//! Three failure kinds reach the caller: invalid arguments, collaborator
//! failures (loading, preprocessing, training) and artifact IO failures.
//! Only [`Error::NoDatasets`] is handled gracefully by the binary.

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Caller supplied arguments that cannot be satisfied.
    InvalidArgument,
    /// A loader, preprocessor or trainer failed.
    CollaboratorFailure,
    /// The experiment artifact could not be written or read.
    IoFailure,
}

/// c2s-train error types
#[derive(Error, Debug)]
pub enum Error {
    /// No dataset paths were given
    #[error("You have to specify at least 1 dataset.")]
    NoDatasets,

    /// Argument validation failed
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// An entry has no cell number after registry normalization
    #[error("Entry {index} has no cell_num (cell numbers are only assigned when the first entry lacks one)")]
    MissingCellNum {
        /// Position of the entry in the aggregated dataset
        index: usize,
    },

    /// Loader, preprocessor or trainer failure, surfaced unchanged
    #[error(transparent)]
    Collaborator(anyhow::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Experiment artifact (de)serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    /// Classify the error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::NoDatasets | Self::InvalidArgument(_) | Self::MissingCellNum { .. } => {
                ErrorKind::InvalidArgument
            }
            Self::Collaborator(_) => ErrorKind::CollaboratorFailure,
            Self::Io(_) | Self::Serialization(_) => ErrorKind::IoFailure,
        }
    }

    /// True when the run should end with a message and a success exit code.
    #[must_use]
    pub const fn is_graceful(&self) -> bool {
        matches!(self, Self::NoDatasets)
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidArgument(msg.into())
    }
}
