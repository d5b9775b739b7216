//! Session context captured once at startup.
//!
//! Host info, build info, the parsed server version and the managed-hosting
//! capability flag do not change while a console is attached, so they are
//! fetched once here and handed to every probe by reference. Live documents
//! (server status, connection status) are never stored here.

use crate::accessor::SnapshotAccessor;
use crate::config::Settings;
use crate::error::Result;
use crate::snapshot::Snapshot;
use crate::version::{parse_version, ServerVersion};

/// Host suffix of managed (Atlas) deployments.
const MANAGED_HOST_SUFFIX: &str = ".mongodb.net";

/// Immutable data shared by all probes for the session.
#[derive(Debug, Clone)]
pub struct ProbeContext {
    host_info: Snapshot,
    build_info: Snapshot,
    version: ServerVersion,
    managed_hosting: bool,
    settings: Settings,
}

impl ProbeContext {
    /// Fetch host and build info and establish the capability flag.
    ///
    /// Fails if either document cannot be fetched or the server version is
    /// malformed; nothing can be registered against an unknown server.
    pub fn capture(accessor: &dyn SnapshotAccessor, settings: Settings) -> Result<Self> {
        let host_info = accessor.host_info()?;
        let build_info = accessor.build_info()?;
        let managed_hosting = match settings.managed_hosting {
            Some(forced) => forced,
            None => detect_managed_hosting(&accessor.connection_uri()?),
        };
        Self::new(host_info, build_info, managed_hosting, settings)
    }

    /// Build a context from already-captured documents.
    pub fn new(
        host_info: Snapshot,
        build_info: Snapshot,
        managed_hosting: bool,
        settings: Settings,
    ) -> Result<Self> {
        let version = parse_version(build_info.str("version")?)?;
        tracing::debug!(
            "Captured server {} (managed hosting: {})",
            version,
            managed_hosting
        );
        Ok(Self {
            host_info,
            build_info,
            version,
            managed_hosting,
            settings,
        })
    }

    /// Host info captured at startup.
    pub fn host_info(&self) -> &Snapshot {
        &self.host_info
    }

    /// Build info captured at startup.
    pub fn build_info(&self) -> &Snapshot {
        &self.build_info
    }

    /// Version of the connected server.
    pub fn version(&self) -> &ServerVersion {
        &self.version
    }

    /// Whether managed-hosting-only features (text search) are available.
    pub fn managed_hosting(&self) -> bool {
        self.managed_hosting
    }

    /// Session settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}

/// Whether a connection string points at a managed (Atlas) deployment.
pub fn detect_managed_hosting(uri: &str) -> bool {
    let rest = uri.split_once("://").map(|(_, rest)| rest).unwrap_or(uri);
    let authority = rest.split(['/', '?']).next().unwrap_or_default();
    let hosts = authority
        .rsplit_once('@')
        .map(|(_, hosts)| hosts)
        .unwrap_or(authority);

    hosts.split(',').any(|host| {
        let name = host.split(':').next().unwrap_or_default();
        name.to_ascii_lowercase().ends_with(MANAGED_HOST_SUFFIX)
    })
}
