//! Error types for manifest building.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort a manifest run.
///
/// Entries that vanish during enumeration are not errors; the walker
/// records them as [`crate::types::SkippedEntry`] and carries on.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Not a directory: {}", path.display())]
    NotADirectory { path: PathBuf },

    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write manifest {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Path contains a tab or newline and cannot be listed: {}", path.display())]
    UnrepresentablePath { path: PathBuf },

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ManifestError {
    /// Process exit status for this failure class.
    ///
    /// Code 2 is left to clap for usage errors.
    pub fn exit_code(&self) -> i32 {
        match self {
            ManifestError::NotADirectory { .. } => 3,
            ManifestError::Read { .. } => 4,
            ManifestError::Write { .. } => 5,
            ManifestError::UnrepresentablePath { .. } => 6,
            ManifestError::Config(_) => 7,
        }
    }

    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::Read {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::Write {
            path: path.into(),
            source,
        }
    }
}

impl From<config::ConfigError> for ManifestError {
    fn from(err: config::ConfigError) -> Self {
        ManifestError::Config(err.to_string())
    }
}
