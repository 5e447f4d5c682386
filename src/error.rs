//! Error types for uptime lookups.

use std::path::PathBuf;

/// Everything that can go wrong while deriving a process's active time.
#[derive(Debug, thiserror::Error)]
pub enum UptimeError {
    #[error("cannot read {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed data in {path}: {details}")]
    MalformedData { path: PathBuf, details: String },

    #[error("process {pid} not found: {source}")]
    ProcessNotFound {
        pid: u32,
        #[source]
        source: std::io::Error,
    },

    #[error("no process named '{name}'")]
    NotFound { name: String },
}

pub type Result<T> = std::result::Result<T, UptimeError>;

impl UptimeError {
    pub(crate) fn malformed(path: impl Into<PathBuf>, details: impl Into<String>) -> Self {
        UptimeError::MalformedData {
            path: path.into(),
            details: details.into(),
        }
    }
}
