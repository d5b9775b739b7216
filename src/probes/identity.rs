//! Who this console is connected as, and to what.

use std::sync::LazyLock;

use regex::Regex;

use crate::accessor::SnapshotAccessor;
use crate::error::Result;
use crate::snapshot::ConnectionStatus;

use super::{ProbeContext, ProbeOutput};

/// Credentials embedded in a connection string.
static CREDENTIALS_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<scheme>[A-Za-z][A-Za-z0-9+.-]*://)(?P<user>[^:@/]+):[^@/]*@")
        .expect("CREDENTIALS_REGEX must compile")
});

/// Replace the password in a connection string with `****`.
pub fn redact_uri(uri: &str) -> String {
    CREDENTIALS_REGEX
        .replace(uri, "${scheme}${user}:****@")
        .into_owned()
}

/// The connection string in use, password redacted.
pub fn whats_my_uri(
    _ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    Ok(ProbeOutput::Text(redact_uri(&accessor.connection_uri()?)))
}

/// Authenticated users (`user/db`) followed by granted roles (`role/db`).
pub fn who_am_i(
    _ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    let reply = accessor.connection_status()?;
    if !reply.is_ok() {
        tracing::warn!("connectionStatus reported ok: {}", reply.ok_flag());
        return Ok(ProbeOutput::Text(format!(
            "connection status query did not succeed (ok: {})",
            reply.ok_flag()
        )));
    }

    let status: ConnectionStatus = reply.section("")?;
    Ok(ProbeOutput::Text(status.principal_lines().join("\n")))
}
