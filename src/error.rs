//! Crate-level error type.

use crate::mt::MtError;
use std::path::PathBuf;
use thiserror::Error;

/// Everything that can abort a deepler command.
///
/// Missing config or histogram files are not errors; they are recovered by
/// the stores with default values.
#[derive(Error, Debug)]
pub enum DeeplerError {
    #[error("IO error on '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse '{}': {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to serialize: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error(transparent)]
    Translation(#[from] MtError),

    #[error("Could not determine the home directory to expand '{0}'")]
    NoHomeDir(String),
}

impl DeeplerError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DeeplerError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, DeeplerError>;
