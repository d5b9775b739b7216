//! Error types for puffin operations.
//!
//! This module defines [`PuffinError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - Use `PuffinError` for domain-specific errors that need distinct handling
//! - Snapshot shape errors ([`PuffinError::MissingField`],
//!   [`PuffinError::InvalidField`]) are turned into informational probe output
//!   by the registry instead of reaching the console as failures
//! - Use `anyhow::Error` (via `PuffinError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

use crate::snapshot::SnapshotKind;

/// Core error type for puffin operations.
#[derive(Debug, Error)]
pub enum PuffinError {
    /// A server version string could not be parsed.
    #[error("Malformed server version: '{input}'")]
    MalformedVersion { input: String },

    /// The snapshot accessor could not complete a fetch or command.
    #[error("{operation} failed: {message}")]
    AccessorFailure { operation: String, message: String },

    /// A field a probe needs is absent from the snapshot.
    #[error("{snapshot} has no field '{path}'")]
    MissingField { snapshot: SnapshotKind, path: String },

    /// A snapshot field is present but has an unexpected shape.
    #[error("{snapshot} field '{path}' is invalid: {message}")]
    InvalidField {
        snapshot: SnapshotKind,
        path: String,
        message: String,
    },

    /// Two probes were declared under the same public name.
    #[error("Duplicate probe name: {name}")]
    DuplicateProbe { name: String },

    /// No probe is registered under the requested name.
    #[error("Unknown command: {name}")]
    UnknownProbe { name: String },

    /// A probe was invoked with the wrong number of arguments.
    #[error("'{probe}' expects {expected} argument(s) ({usage}), got {got}")]
    InvalidArguments {
        probe: String,
        expected: usize,
        got: usize,
        usage: String,
    },

    /// Settings file not found at an explicitly requested location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse a settings file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error wrapper.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic wrapped error for anyhow interop; prints the whole context chain.
    #[error("{0:#}")]
    Other(#[from] anyhow::Error),
}

impl PuffinError {
    /// Build an accessor failure for the named operation.
    pub fn accessor(operation: impl Into<String>, message: impl Into<String>) -> Self {
        Self::AccessorFailure {
            operation: operation.into(),
            message: message.into(),
        }
    }

    /// Whether this error describes a snapshot that lacks the expected shape.
    pub fn is_snapshot_shape(&self) -> bool {
        matches!(self, Self::MissingField { .. } | Self::InvalidField { .. })
    }
}

/// Result type alias for puffin operations.
pub type Result<T> = std::result::Result<T, PuffinError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_version_displays_input() {
        let err = PuffinError::MalformedVersion {
            input: "a.b.c".into(),
        };
        assert!(err.to_string().contains("a.b.c"));
    }

    #[test]
    fn accessor_failure_displays_operation_and_message() {
        let err = PuffinError::accessor("serverStatus", "connection refused");
        let msg = err.to_string();
        assert!(msg.contains("serverStatus"));
        assert!(msg.contains("connection refused"));
    }

    #[test]
    fn missing_field_displays_snapshot_and_path() {
        let err = PuffinError::MissingField {
            snapshot: SnapshotKind::ServerStatus,
            path: "wiredTiger.cache".into(),
        };
        assert_eq!(
            err.to_string(),
            "server-status has no field 'wiredTiger.cache'"
        );
    }

    #[test]
    fn invalid_arguments_displays_usage() {
        let err = PuffinError::InvalidArguments {
            probe: "search".into(),
            expected: 3,
            got: 1,
            usage: "<collection> <query> <path>".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("search"));
        assert!(msg.contains("<collection> <query> <path>"));
        assert!(msg.contains("got 1"));
    }

    #[test]
    fn snapshot_shape_errors_are_classified() {
        let missing = PuffinError::MissingField {
            snapshot: SnapshotKind::HostInfo,
            path: "os".into(),
        };
        let invalid = PuffinError::InvalidField {
            snapshot: SnapshotKind::HostInfo,
            path: "os".into(),
            message: "expected a map".into(),
        };
        assert!(missing.is_snapshot_shape());
        assert!(invalid.is_snapshot_shape());
        assert!(!PuffinError::accessor("ping", "timeout").is_snapshot_shape());
    }

    #[test]
    fn io_error_converts_from_std() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "mongosh missing");
        let err: PuffinError = io_err.into();
        assert!(matches!(err, PuffinError::Io(_)));
    }

    #[test]
    fn wrapped_error_keeps_context_chain() {
        let inner = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err: PuffinError = anyhow::Error::new(inner)
            .context("reading snapshot bundle b.json")
            .into();
        assert_eq!(err.to_string(), "reading snapshot bundle b.json: gone");
    }

    #[test]
    fn result_type_alias_works() {
        fn returns_error() -> Result<()> {
            Err(PuffinError::UnknownProbe {
                name: "nope".into(),
            })
        }
        assert!(returns_error().is_err());
    }
}
