//! Diagnostics gated on the role of the connected node.

use serde_json::json;

use crate::accessor::SnapshotAccessor;
use crate::error::Result;
use crate::render::render_scalars;

use super::{ProbeContext, ProbeOutput};

/// Returned by `pool` when connected to the primary.
pub const POOL_ON_PRIMARY: &str =
    "pool diagnostics are only available on a secondary; connect to a secondary member and retry";

/// Whether the connected node is the writable primary.
///
/// Uses `hello`, falling back to the legacy `isMaster` on servers that do
/// not know it.
pub fn is_primary(accessor: &dyn SnapshotAccessor) -> Result<bool> {
    let hello = accessor.run_admin_command(&json!({"hello": 1}))?;
    if hello.is_ok() {
        if let Some(primary) = hello.flag("isWritablePrimary") {
            return Ok(primary);
        }
    }

    let legacy = accessor.run_admin_command(&json!({"isMaster": 1}))?;
    Ok(legacy.flag("ismaster").unwrap_or(false))
}

/// Headline connection pool counters.
pub fn pool(
    _ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    if is_primary(accessor)? {
        return Ok(ProbeOutput::Unsupported(POOL_ON_PRIMARY.to_string()));
    }

    let stats = accessor.run_admin_command(&json!({"connPoolStats": 1}))?;
    Ok(ProbeOutput::Text(render_scalars(stats.map("")?)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::test_support::{accessor_for, bundle, context_for, healthy};

    #[test]
    fn secondary_reports_pool_counters() {
        let (ctx, accessor) = healthy();
        assert_eq!(
            pool(&ctx, &accessor, &[]).unwrap(),
            ProbeOutput::Text("numClientConnections: 0\ntotalInUse: 1\ntotalAvailable: 3".into())
        );
    }

    #[test]
    fn primary_gets_instructions() {
        let mut bundle = bundle();
        bundle["commands"]["hello"] = json!({"isWritablePrimary": true, "ok": 1});
        let accessor = accessor_for(bundle);
        let ctx = context_for(&accessor);

        assert_eq!(
            pool(&ctx, &accessor, &[]).unwrap(),
            ProbeOutput::Unsupported(POOL_ON_PRIMARY.into())
        );
        assert!(accessor.calls().iter().all(|c| c != "admin:connPoolStats"));
    }

    #[test]
    fn legacy_servers_use_is_master() {
        let mut bundle = bundle();
        bundle["commands"]["hello"] = json!({"ok": 0, "errmsg": "no such command: 'hello'"});
        bundle["commands"]["isMaster"] = json!({"ismaster": true, "ok": 1});
        let accessor = accessor_for(bundle);
        assert!(is_primary(&accessor).unwrap());
    }
}
