//! Error type shared by the drawing core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the shape model, drawing state machine, command engine,
/// registry and storage layers.
#[derive(Debug, Error)]
pub enum DrawError {
    /// An operation was called in a state that does not accept it.
    #[error("cannot {operation} while {state}")]
    InvalidState {
        operation: &'static str,
        state: &'static str,
    },

    /// An attribute value was rejected (negative stroke width, bad color, ...).
    #[error("invalid attribute: {0}")]
    InvalidAttribute(String),

    /// No factory is registered under the requested kind name.
    #[error("unknown shape kind '{0}'")]
    UnknownKind(String),

    /// A factory was already registered under this kind name.
    #[error("shape kind '{0}' is already registered")]
    DuplicateRegistration(String),

    /// The drawing file could not be read or written.
    #[error("i/o failure on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The drawing file is not a valid record document.
    #[error("malformed drawing file {}: {source}", path.display())]
    Malformed {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The drawing file exceeds the configured size limit.
    #[error("{} is {size} bytes which exceeds the limit of {limit} bytes", path.display())]
    TooLarge { path: PathBuf, size: u64, limit: u64 },
}

impl DrawError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Result type for drawing core operations.
pub type Result<T> = std::result::Result<T, DrawError>;
