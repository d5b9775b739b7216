//! Accessor backed by a captured snapshot bundle.
//!
//! A bundle is one JSON document holding the replies a server gave at some
//! point in time:
//!
//! ```json
//! {
//!   "uri": "mongodb://db1.example.com:27017",
//!   "hostInfo": { "system": { "hostname": "db1" } },
//!   "buildInfo": { "version": "7.0.2", "bits": 64 },
//!   "serverStatus": { "uptime": 90061 },
//!   "connectionStatus": { "authInfo": {}, "ok": 1 },
//!   "collections": ["movies"],
//!   "commands": { "ping": { "ok": 1 } },
//!   "search": [ { "name": "x", "score": 1.2 } ]
//! }
//! ```
//!
//! Every request is recorded so callers can check what was (or was not)
//! asked of the server.

use std::cell::RefCell;
use std::fs;
use std::path::Path;
use std::thread;
use std::time::Duration;

use anyhow::Context;
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{PuffinError, Result};
use crate::snapshot::{Snapshot, SnapshotKind};

use super::{command_name, word_size, SearchRequest, SnapshotAccessor};

/// Connection string reported when a bundle does not carry one.
const DEFAULT_FIXTURE_URI: &str = "mongodb://snapshot.invalid:27017";

/// The contents of a snapshot bundle.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Fixture {
    #[serde(default)]
    pub uri: Option<String>,
    #[serde(default)]
    pub host_info: Option<Value>,
    #[serde(default)]
    pub build_info: Option<Value>,
    #[serde(default)]
    pub server_status: Option<Value>,
    #[serde(default)]
    pub connection_status: Option<Value>,
    #[serde(default)]
    pub server_bits: Option<u32>,
    #[serde(default)]
    pub collections: Option<Vec<String>>,
    /// Replies to other commands, keyed by command name.
    #[serde(default)]
    pub commands: Map<String, Value>,
    #[serde(default)]
    pub search: Option<Value>,
}

/// Serves replies from a [`Fixture`].
#[derive(Debug, Default)]
pub struct FixtureAccessor {
    fixture: Fixture,
    latency: Duration,
    calls: RefCell<Vec<String>>,
}

impl FixtureAccessor {
    /// Serve the given bundle.
    pub fn new(fixture: Fixture) -> Self {
        Self {
            fixture,
            ..Default::default()
        }
    }

    /// Parse a bundle from a JSON value.
    pub fn from_value(value: Value) -> Result<Self> {
        Ok(Self::new(serde_json::from_value(value)?))
    }

    /// Load a bundle from a JSON file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading snapshot bundle {}", path.display()))?;
        let fixture: Fixture = serde_json::from_str(&content)
            .with_context(|| format!("parsing snapshot bundle {}", path.display()))?;
        tracing::debug!("Loaded snapshot bundle from {}", path.display());
        Ok(Self::new(fixture))
    }

    /// Delay every command by `latency`, to simulate a slow link.
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Every request made so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.borrow().clone()
    }

    fn record(&self, call: impl Into<String>) {
        self.calls.borrow_mut().push(call.into());
    }

    fn captured(&self, operation: &str, reply: Option<&Value>) -> Result<Value> {
        reply
            .cloned()
            .ok_or_else(|| PuffinError::accessor(operation, "not captured in snapshot bundle"))
    }

    fn reply(&self, scope: &str, command: &Value) -> Result<Snapshot> {
        let name = command_name(command).unwrap_or_default().to_string();
        self.record(format!("{}:{}", scope, name));
        if !self.latency.is_zero() {
            thread::sleep(self.latency);
        }

        let (kind, captured) = match name.as_str() {
            "hostInfo" => (SnapshotKind::HostInfo, self.fixture.host_info.as_ref()),
            "buildInfo" => (SnapshotKind::BuildInfo, self.fixture.build_info.as_ref()),
            "serverStatus" => (
                SnapshotKind::ServerStatus,
                self.fixture.server_status.as_ref(),
            ),
            "connectionStatus" => (
                SnapshotKind::ConnectionStatus,
                self.fixture.connection_status.as_ref(),
            ),
            other => (SnapshotKind::Command, self.fixture.commands.get(other)),
        };
        Ok(Snapshot::new(kind, self.captured(&name, captured)?))
    }
}

impl SnapshotAccessor for FixtureAccessor {
    fn run_admin_command(&self, command: &Value) -> Result<Snapshot> {
        self.reply("admin", command)
    }

    fn run_command(&self, command: &Value) -> Result<Snapshot> {
        self.reply("db", command)
    }

    fn list_collection_names(&self) -> Result<Vec<String>> {
        self.record("listCollections");
        self.fixture
            .collections
            .clone()
            .ok_or_else(|| PuffinError::accessor("listCollections", "not captured in snapshot bundle"))
    }

    fn search(&self, request: &SearchRequest) -> Result<Value> {
        self.record(format!("search:{}", request.collection));
        self.captured("search", self.fixture.search.as_ref())
    }

    fn connection_uri(&self) -> Result<String> {
        Ok(self
            .fixture
            .uri
            .clone()
            .unwrap_or_else(|| DEFAULT_FIXTURE_URI.to_string()))
    }

    fn server_bits(&self) -> Result<u32> {
        match self.fixture.server_bits {
            Some(bits) => {
                self.record("serverBits");
                Ok(bits)
            }
            None => word_size(&self.build_info()?),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn accessor() -> FixtureAccessor {
        FixtureAccessor::from_value(json!({
            "hostInfo": {"system": {"hostname": "db1"}},
            "buildInfo": {"version": "7.0.2", "bits": 64},
            "serverStatus": {"uptime": 10},
            "commands": {"ping": {"ok": 1}},
            "collections": ["a", "b"]
        }))
        .unwrap()
    }

    #[test]
    fn snapshot_fetches_are_tagged() {
        let accessor = accessor();
        assert_eq!(accessor.host_info().unwrap().kind(), SnapshotKind::HostInfo);
        assert_eq!(
            accessor.server_status().unwrap().kind(),
            SnapshotKind::ServerStatus
        );
    }

    #[test]
    fn commands_are_served_by_name() {
        let accessor = accessor();
        let reply = accessor.run_admin_command(&json!({"ping": 1})).unwrap();
        assert!(reply.is_ok());
    }

    #[test]
    fn uncaptured_command_is_accessor_failure() {
        let err = accessor()
            .run_admin_command(&json!({"getCmdLineOpts": 1}))
            .unwrap_err();
        assert!(matches!(err, PuffinError::AccessorFailure { .. }));
        assert!(err.to_string().contains("getCmdLineOpts"));
    }

    #[test]
    fn calls_are_recorded_in_order() {
        let accessor = accessor();
        accessor.server_status().unwrap();
        accessor.list_collection_names().unwrap();
        accessor.connection_status().ok();
        assert_eq!(
            accessor.calls(),
            vec!["admin:serverStatus", "listCollections", "db:connectionStatus"]
        );
    }

    #[test]
    fn server_bits_falls_back_to_build_info() {
        assert_eq!(accessor().server_bits().unwrap(), 64);
    }

    #[test]
    fn out_of_range_bits_are_rejected() {
        for bits in [json!(-1), json!(8_589_934_656u64)] {
            let accessor = FixtureAccessor::from_value(json!({
                "buildInfo": {"version": "7.0.2", "bits": bits.clone()}
            }))
            .unwrap();
            let err = accessor.server_bits().unwrap_err();
            assert!(matches!(err, PuffinError::InvalidField { .. }), "{bits}");
        }
    }

    #[test]
    fn explicit_server_bits_wins() {
        let accessor = FixtureAccessor::new(Fixture {
            server_bits: Some(32),
            ..Default::default()
        });
        assert_eq!(accessor.server_bits().unwrap(), 32);
    }

    #[test]
    fn default_uri_when_absent() {
        assert_eq!(accessor().connection_uri().unwrap(), DEFAULT_FIXTURE_URI);
    }

    #[test]
    fn loads_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"uri": "mongodb://file:27017", "collections": []}}"#).unwrap();
        let accessor = FixtureAccessor::from_file(file.path()).unwrap();
        assert_eq!(accessor.connection_uri().unwrap(), "mongodb://file:27017");
        assert!(accessor.list_collection_names().unwrap().is_empty());
    }

    #[test]
    fn missing_file_error_names_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("absent.json");
        let err = FixtureAccessor::from_file(&path).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("reading snapshot bundle"), "{msg}");
        assert!(msg.contains("absent.json"), "{msg}");
    }

    #[test]
    fn malformed_file_error_names_path() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{\"uri\": ").unwrap();
        let err = FixtureAccessor::from_file(file.path()).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("parsing snapshot bundle"), "{msg}");
        assert!(msg.contains(&file.path().display().to_string()), "{msg}");
    }

    #[test]
    fn latency_delays_commands() {
        let accessor = accessor().with_latency(Duration::from_millis(20));
        let start = std::time::Instant::now();
        accessor.run_admin_command(&json!({"ping": 1})).unwrap();
        assert!(start.elapsed() >= Duration::from_millis(20));
    }
}
