//! Level store error types.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors from reading or writing level and record files
#[derive(Debug)]
pub enum StoreError {
    /// A filesystem operation on `path` failed.
    Io {
        path: PathBuf,
        source: io::Error,
    },

    /// The level number has no entry in the level table. The frame driver
    /// checks the table before loading, so only direct callers of
    /// `LevelStore::load_level` see this.
    UnknownLevel { level: u32 },

    /// The level file was still missing after regenerating the level set.
    MissingAfterRegenerate { path: PathBuf },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        StoreError::Io {
            path: path.into(),
            source,
        }
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Io { path, source } => {
                write!(f, "i/o error on '{}': {}", path.display(), source)
            }
            StoreError::UnknownLevel { level } => {
                write!(f, "level {} is not configured", level)
            }
            StoreError::MissingAfterRegenerate { path } => write!(
                f,
                "level file '{}' is still missing after regeneration",
                path.display()
            ),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StoreError::Io { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience alias: a `Result` using `StoreError` as the error type.
pub type StoreResult<T> = Result<T, StoreError>;
