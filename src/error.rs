//! Error types for midi-e2e.

use std::io;
use std::path::PathBuf;

/// Errors that abort a run.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    #[error("Failed to run {} on {}: {source}", executable.display(), file.display())]
    Spawn {
        executable: PathBuf,
        file: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Failed to parse config {}: {source}", path.display())]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml_ng::Error,
    },
}

pub type Result<T> = std::result::Result<T, HarnessError>;
