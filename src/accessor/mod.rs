//! Access to the connected server.
//!
//! The [`SnapshotAccessor`] trait is the only way probes reach the server.
//! Two implementations are provided:
//!
//! - [`MongoshAccessor`] - runs each request through the `mongosh` shell
//! - [`FixtureAccessor`] - serves a captured snapshot bundle, for offline
//!   diagnosis and tests
//!
//! Every method either returns a document or a signaled
//! [`AccessorFailure`](crate::error::PuffinError::AccessorFailure); a failed
//! fetch is never coerced into an empty or zero value.

pub mod fixture;
pub mod mongosh;

pub use fixture::{Fixture, FixtureAccessor};
pub use mongosh::MongoshAccessor;

use serde_json::{json, Value};

use crate::error::{PuffinError, Result};
use crate::snapshot::{Snapshot, SnapshotKind};

/// A ranked text search against one collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    pub collection: String,
    pub query: String,
    pub path: String,
    pub limit: usize,
}

impl SearchRequest {
    /// The aggregation pipeline that runs this search.
    ///
    /// Results are projected to `name` and the relevance `score`.
    pub fn pipeline(&self) -> Value {
        json!([
            {"$search": {"text": {"query": self.query, "path": self.path}}},
            {"$limit": self.limit},
            {"$project": {"_id": 0, "name": 1, "score": {"$meta": "searchScore"}}}
        ])
    }
}

/// Supplies server documents and runs commands on request.
///
/// Implementors provide the command primitives; the snapshot fetches have
/// default implementations in terms of them.
pub trait SnapshotAccessor {
    /// Run a command against the `admin` database.
    fn run_admin_command(&self, command: &Value) -> Result<Snapshot>;

    /// Run a command against the current database.
    fn run_command(&self, command: &Value) -> Result<Snapshot>;

    /// Names of the collections in the current database.
    fn list_collection_names(&self) -> Result<Vec<String>>;

    /// Run a ranked text search.
    fn search(&self, request: &SearchRequest) -> Result<Value>;

    /// The connection string as the client sees it.
    fn connection_uri(&self) -> Result<String>;

    /// Host info document.
    fn host_info(&self) -> Result<Snapshot> {
        let reply = self.run_admin_command(&json!({"hostInfo": 1}))?;
        Ok(Snapshot::new(SnapshotKind::HostInfo, reply.document().clone()))
    }

    /// Build info document.
    fn build_info(&self) -> Result<Snapshot> {
        let reply = self.run_admin_command(&json!({"buildInfo": 1}))?;
        Ok(Snapshot::new(SnapshotKind::BuildInfo, reply.document().clone()))
    }

    /// Live server status document.
    fn server_status(&self) -> Result<Snapshot> {
        let reply = self.run_admin_command(&json!({"serverStatus": 1}))?;
        Ok(Snapshot::new(SnapshotKind::ServerStatus, reply.document().clone()))
    }

    /// Live connection status document.
    fn connection_status(&self) -> Result<Snapshot> {
        let reply = self.run_command(&json!({"connectionStatus": 1}))?;
        Ok(Snapshot::new(
            SnapshotKind::ConnectionStatus,
            reply.document().clone(),
        ))
    }

    /// Word size of the server binary (32 or 64).
    fn server_bits(&self) -> Result<u32> {
        word_size(&self.build_info()?)
    }
}

/// Read the `bits` field of a build-info document.
pub fn word_size(build_info: &Snapshot) -> Result<u32> {
    let bits = build_info.number("bits")?;
    u32::try_from(bits as i64).map_err(|_| PuffinError::InvalidField {
        snapshot: SnapshotKind::BuildInfo,
        path: "bits".to_string(),
        message: format!("{} is not a word size", bits),
    })
}

/// Name of a command document (its first key), for logging and lookups.
pub fn command_name(command: &Value) -> Option<&str> {
    command
        .as_object()
        .and_then(|map| map.keys().next())
        .map(String::as_str)
}
