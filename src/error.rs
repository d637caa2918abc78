// src/error.rs
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TallyError {
    #[error("I/O error: {source} (path: {path})")]
    Io {
        source: std::io::Error,
        path: PathBuf,
    },

    #[error("summary table not found: {0}")]
    MissingSummary(PathBuf),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, TallyError>;

// Allow `?` on std::io::Error by converting to TallyError::Io with unknown path.
impl From<std::io::Error> for TallyError {
    fn from(source: std::io::Error) -> Self {
        TallyError::Io {
            source,
            path: PathBuf::from("<unknown>"),
        }
    }
}

impl TallyError {
    /// Attaches a path to a bare I/O error.
    #[must_use]
    pub fn io(source: std::io::Error, path: impl Into<PathBuf>) -> Self {
        TallyError::Io {
            source,
            path: path.into(),
        }
    }
}
