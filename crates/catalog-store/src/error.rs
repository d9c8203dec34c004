//! Store errors.

use std::path::PathBuf;

use catalog_core::ChallengeFile;
use thiserror::Error;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

/// Errors raised while reading the data root.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The requested id is not a challenge id.
    #[error("invalid challenge id: {0:?}")]
    InvalidId(String),

    /// No directory exists for the requested challenge.
    #[error("challenge {id} not found")]
    NotFound { id: String },

    /// The challenge directory lacks one of its files.
    #[error("challenge {id} is missing {file}")]
    MissingFile { id: String, file: ChallengeFile },

    /// `metadata.json` is not valid JSON or lacks a string `label`.
    #[error("malformed metadata in {path}: {source}")]
    Metadata {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A challenge file is not UTF-8 text.
    #[error("{path} is not valid UTF-8")]
    Encoding { path: PathBuf },

    /// Any other filesystem failure.
    #[error("IO error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Coarse classification of a [`StoreError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The challenge, or one of its files, does not exist.
    NotFound,
    /// The challenge exists but its content cannot be used.
    MalformedData,
    /// Storage could not be read.
    Io,
}

impl StoreError {
    /// Create an IO error for a path.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Classify the error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidId(_) | Self::NotFound { .. } | Self::MissingFile { .. } => {
                ErrorKind::NotFound
            }
            Self::Metadata { .. } | Self::Encoding { .. } => ErrorKind::MalformedData,
            Self::Io { .. } => ErrorKind::Io,
        }
    }

    /// Whether the error means the challenge does not exist.
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}
