//! Error types for log scanning

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while scanning a fetch log
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to open log file {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read log file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid line pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Result type for scan operations
pub type Result<T> = std::result::Result<T, ScanError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::ErrorKind;

    #[test]
    fn test_open_error_mentions_path() {
        let err = ScanError::Open {
            path: PathBuf::from("missing.log"),
            source: std::io::Error::new(ErrorKind::NotFound, "no such file"),
        };
        let msg = err.to_string();
        assert!(msg.contains("missing.log"));
        assert!(msg.contains("no such file"));
    }

    #[test]
    fn test_io_error_converts() {
        let io = std::io::Error::new(ErrorKind::PermissionDenied, "denied");
        let err: ScanError = io.into();
        assert!(matches!(err, ScanError::Io(_)));
        assert!(err.to_string().contains("denied"));
    }
}
