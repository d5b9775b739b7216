//! Counter groups rendered straight from server status.
//!
//! The key sets differ between server versions and builds, so none of these
//! probes name individual counters.

use crate::accessor::SnapshotAccessor;
use crate::error::Result;
use crate::render::render;
use crate::version::{requires_at_least, requires_version_message, VersionRequirement};

use super::{ProbeContext, ProbeOutput};

/// Server line whose `connections` section `conns` understands.
pub const CONNS_REQUIREMENT: VersionRequirement = VersionRequirement::MajorMinor(5, 0);

fn counter_group(accessor: &dyn SnapshotAccessor, section: &str) -> Result<ProbeOutput> {
    let status = accessor.server_status()?;
    Ok(ProbeOutput::Text(render(status.map(section)?)))
}

/// `opcounters`.
pub fn opcounters(
    _ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    counter_group(accessor, "opcounters")
}

/// `opcountersRepl`.
pub fn opcounters_repl(
    _ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    counter_group(accessor, "opcountersRepl")
}

/// `transportSecurity`.
pub fn tls(
    _ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    counter_group(accessor, "transportSecurity")
}

/// `connections`, gated on [`CONNS_REQUIREMENT`].
pub fn conns(
    ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    if requires_at_least(ctx.version(), CONNS_REQUIREMENT) {
        return Ok(ProbeOutput::Unsupported(requires_version_message(
            CONNS_REQUIREMENT,
        )));
    }
    counter_group(accessor, "connections")
}
