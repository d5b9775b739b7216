//! Point-in-time server documents and their typed views.
//!
//! A [`Snapshot`] wraps one document returned by the accessor together with
//! the kind of document it is. Probes never index raw JSON: they ask the
//! snapshot for a typed section, and a missing or mistyped field fails there
//! with an error naming the snapshot and the field path.
//!
//! # Modules
//!
//! - [`ejson`] - tolerant reading of extended-JSON numbers and dates
//! - [`host`] - host info sections
//! - [`build`] - build info
//! - [`status`] - server status sections
//! - [`connection`] - connection status (authenticated principals)

pub mod build;
pub mod connection;
pub mod ejson;
pub mod host;
pub mod status;

pub use build::BuildInfo;
pub use connection::{AuthInfo, ConnectionStatus, RoleRef, UserRef};
pub use host::{HostExtra, HostOs, HostSystem};
pub use status::{ClientCounts, GlobalLock, MemoryStats, TransactionStats, WiredTigerCache};

use std::fmt;

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::{PuffinError, Result};

/// Which server document a snapshot holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnapshotKind {
    HostInfo,
    BuildInfo,
    ServerStatus,
    ConnectionStatus,
    /// Reply to an ad-hoc administrative or database command.
    Command,
}

impl fmt::Display for SnapshotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::HostInfo => "host-info",
            Self::BuildInfo => "build-info",
            Self::ServerStatus => "server-status",
            Self::ConnectionStatus => "connection-status",
            Self::Command => "command reply",
        };
        f.write_str(name)
    }
}

/// An immutable server document.
#[derive(Debug, Clone, PartialEq)]
pub struct Snapshot {
    kind: SnapshotKind,
    document: Value,
}

impl Snapshot {
    /// Wrap a document returned by the accessor.
    pub fn new(kind: SnapshotKind, document: Value) -> Self {
        Self { kind, document }
    }

    /// The kind of document held.
    pub fn kind(&self) -> SnapshotKind {
        self.kind
    }

    /// The raw document.
    pub fn document(&self) -> &Value {
        &self.document
    }

    /// Look up a dotted field path, if present.
    pub fn get(&self, path: &str) -> Option<&Value> {
        if path.is_empty() {
            return Some(&self.document);
        }
        path.split('.')
            .try_fold(&self.document, |value, key| value.get(key))
    }

    /// Look up a dotted field path, failing if it is absent.
    pub fn require(&self, path: &str) -> Result<&Value> {
        self.get(path).ok_or_else(|| self.missing(path))
    }

    /// Deserialize the section at `path` into a typed view.
    pub fn section<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.require(path)?;
        serde_json::from_value(value.clone()).map_err(|e| self.invalid(path, e.to_string()))
    }

    /// Like [`Snapshot::section`], but an absent section is `None`.
    pub fn optional_section<T: DeserializeOwned>(&self, path: &str) -> Result<Option<T>> {
        match self.get(path) {
            None | Some(Value::Null) => Ok(None),
            Some(_) => self.section(path).map(Some),
        }
    }

    /// The object at `path`, in document order.
    pub fn map(&self, path: &str) -> Result<&Map<String, Value>> {
        self.require(path)?
            .as_object()
            .ok_or_else(|| self.invalid(path, "expected a document"))
    }

    /// The string at `path`.
    pub fn str(&self, path: &str) -> Result<&str> {
        self.require(path)?
            .as_str()
            .ok_or_else(|| self.invalid(path, "expected a string"))
    }

    /// The number at `path`, accepting extended-JSON wrappers.
    pub fn number(&self, path: &str) -> Result<f64> {
        ejson::as_f64(self.require(path)?).ok_or_else(|| self.invalid(path, "expected a number"))
    }

    /// The date at `path`, accepting ISO strings and `{"$date": ...}`.
    pub fn datetime(&self, path: &str) -> Result<DateTime<Utc>> {
        ejson::as_datetime(self.require(path)?).ok_or_else(|| self.invalid(path, "expected a date"))
    }

    /// The boolean at `path`, if present and boolean.
    pub fn flag(&self, path: &str) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    /// The command status flag (`ok`), or `0` when absent.
    pub fn ok_flag(&self) -> f64 {
        self.get("ok").and_then(ejson::as_f64).unwrap_or(0.0)
    }

    /// Whether the document reports `ok: 1`.
    pub fn is_ok(&self) -> bool {
        self.ok_flag() == 1.0
    }

    fn missing(&self, path: &str) -> PuffinError {
        PuffinError::MissingField {
            snapshot: self.kind,
            path: path.to_string(),
        }
    }

    fn invalid(&self, path: &str, message: impl Into<String>) -> PuffinError {
        PuffinError::InvalidField {
            snapshot: self.kind,
            path: path.to_string(),
            message: message.into(),
        }
    }
}
