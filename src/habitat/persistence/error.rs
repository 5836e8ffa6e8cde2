//! Error type for snapshot save/load.

use std::fmt;
use std::path::PathBuf;

#[derive(Debug)]
pub enum PersistenceError {
    /// Reading, writing or creating a directory failed.
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The snapshot could not be turned into JSON.
    Serialize(serde_json::Error),
    /// The file is not a readable snapshot at all.
    Parse(String),
}

impl fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistenceError::Io { path, source } => {
                write!(f, "I/O error on {}: {}", path.display(), source)
            }
            PersistenceError::Serialize(e) => write!(f, "Failed to serialize habitat: {}", e),
            PersistenceError::Parse(msg) => write!(f, "Failed to parse habitat file: {}", msg),
        }
    }
}

impl std::error::Error for PersistenceError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PersistenceError::Io { source, .. } => Some(source),
            PersistenceError::Serialize(e) => Some(e),
            PersistenceError::Parse(_) => None,
        }
    }
}
