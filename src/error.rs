//! Error types for the PDF writer.
//!
//! Every failure aborts file generation. There is no partial output: the
//! caller discards the in-progress document on any error.

use std::path::PathBuf;

/// Result type alias for PDF writer operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while building or writing a PDF document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The object graph is inconsistent (duplicate field name, dangling
    /// reference, unknown location marker, radio group mismatch).
    #[error("Object graph integrity error: {0}")]
    GraphIntegrity(String),

    /// Caller-supplied input was rejected.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An external resource file could not be read.
    #[error("Reading {path} failed: {source}")]
    ResourceLoad {
        /// Path of the file that failed to load
        path: PathBuf,
        /// Underlying I/O error
        source: std::io::Error,
    },

    /// A once-only document entry was defined a second time.
    #[error("{0} is already defined")]
    AlreadyDefined(String),

    /// The object directory was already closed.
    #[error("Object directory is already finalized")]
    AlreadyFinalized,

    /// Stream or string encryption failed.
    #[error("Encryption error: {0}")]
    Encryption(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    pub(crate) fn integrity(msg: impl Into<String>) -> Self {
        Error::GraphIntegrity(msg.into())
    }

    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Error::InvalidInput(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_integrity_error() {
        let err = Error::integrity("Duplicate field name on the same page");
        let msg = format!("{}", err);
        assert!(msg.contains("integrity"));
        assert!(msg.contains("Duplicate field name"));
    }

    #[test]
    fn test_resource_load_error() {
        let err = Error::ResourceLoad {
            path: PathBuf::from("missing.xml"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such file"),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("missing.xml"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_already_defined_error() {
        let err = Error::AlreadyDefined("Metadata".to_string());
        assert_eq!(format!("{}", err), "Metadata is already defined");
    }

    #[test]
    fn test_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<Error>();
    }
}
