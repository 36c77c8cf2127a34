//! Error types for the log export pipeline

#![warn(clippy::all, rust_2018_idioms)]

use std::path::PathBuf;
use thiserror::Error;

/// Error text reported by the log service for a single call
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct SourceError {
    pub message: String,
}

impl SourceError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Problems resolving the export time window
#[derive(Debug, Error)]
pub enum WindowError {
    #[error("invalid end time '{input}', expected format YYYY-MM-DD HH:MM:SS +HHMM: {source}")]
    Parse {
        input: String,
        #[source]
        source: chrono::ParseError,
    },

    #[error("interval must be a positive number of minutes, got {0}")]
    NonPositiveInterval(i64),

    #[error("interval of {0} minutes is out of range")]
    IntervalOutOfRange(i64),
}

/// Failures that abort the whole export run
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to list log streams: {0}")]
    ListStreams(#[source] SourceError),

    #[error("failed to write log file {path:?}: {source}")]
    Output {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ExportError {
    /// Process exit code for this failure
    pub fn exit_code(&self) -> i32 {
        match self {
            ExportError::ListStreams(_) => -1,
            ExportError::Output { .. } => 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes() {
        let list = ExportError::ListStreams(SourceError::new("AccessDenied"));
        assert_eq!(list.exit_code(), -1);

        let output = ExportError::Output {
            path: PathBuf::from("stream.log"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(output.exit_code(), 1);
    }

    #[test]
    fn test_source_error_displays_raw_text() {
        let err = SourceError::new("An error occurred (ResourceNotFoundException)");
        assert_eq!(err.to_string(), "An error occurred (ResourceNotFoundException)");
    }
}
