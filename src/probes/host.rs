//! Host, OS and build identity probes.

use serde_json::json;

use crate::accessor::SnapshotAccessor;
use crate::error::{PuffinError, Result};
use crate::snapshot::{BuildInfo, HostExtra, HostOs, HostSystem, Snapshot};

use super::{ProbeContext, ProbeOutput};

/// Product name printed by `mname`.
const PRODUCT_NAME: &str = "MongoDB";

/// Shown in place of a build revision the server does not report.
const UNKNOWN_REVISION: &str = "unknown";

/// Display form of the host clock.
const TIME_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT+0000";

/// Server word size.
pub fn arch(
    _ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    Ok(ProbeOutput::Text(accessor.server_bits()?.to_string()))
}

/// `<os type> <hostname> <kernel version>`.
pub fn uname(
    ctx: &ProbeContext,
    _accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    let host = ctx.host_info();
    let system: HostSystem = host.section("system")?;
    let os: HostOs = host.section("os")?;
    let extra: HostExtra = host.optional_section("extra")?.unwrap_or_default();

    let values = [
        os.kind,
        system.hostname,
        extra.version_string.unwrap_or_default(),
    ];
    Ok(ProbeOutput::Text(values.join(" ")))
}

/// `<os name> <os type> <os version>`.
pub fn os(
    ctx: &ProbeContext,
    _accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    let os: HostOs = ctx.host_info().section("os")?;
    let values = [os.name, os.kind, os.version];
    Ok(ProbeOutput::Text(values.join(" ")))
}

/// Host clock as reported in host info.
pub fn time(
    ctx: &ProbeContext,
    _accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    let now = ctx.host_info().datetime("system.currentTime")?;
    Ok(ProbeOutput::Text(now.format(TIME_FORMAT).to_string()))
}

/// `MongoDB <version> <git revision>`.
pub fn mname(
    ctx: &ProbeContext,
    _accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    let build: BuildInfo = ctx.build_info().section("")?;
    let values = [
        PRODUCT_NAME.to_string(),
        build.version,
        build
            .git_version
            .unwrap_or_else(|| UNKNOWN_REVISION.to_string()),
    ];
    Ok(ProbeOutput::Text(values.join(" ")))
}

/// The server's `argv`, space-joined.
pub fn cmd_line_opts(
    _ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    let Some(reply) = successful_admin_command(accessor, "getCmdLineOpts")? else {
        return Ok(ProbeOutput::Empty);
    };
    let argv: Vec<String> = reply.section("argv")?;
    Ok(ProbeOutput::Text(argv.join(" ")))
}

/// Storage engines compiled into the server, one per line.
pub fn storage_engines(
    _ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    let Some(reply) = successful_admin_command(accessor, "buildInfo")? else {
        return Ok(ProbeOutput::Empty);
    };
    let engines: Vec<String> = reply.section("storageEngines")?;
    Ok(ProbeOutput::Text(engines.join("\n")))
}

/// Run `{<name>: 1}` and keep the reply only if it reports success.
///
/// A command the server rejects, or one the accessor cannot run, means
/// "nothing to report" for these probes rather than a failure.
fn successful_admin_command(
    accessor: &dyn SnapshotAccessor,
    name: &str,
) -> Result<Option<Snapshot>> {
    match accessor.run_admin_command(&json!({ name: 1 })) {
        Ok(reply) if reply.is_ok() => Ok(Some(reply)),
        Ok(reply) => {
            tracing::debug!("{} reported ok: {}", name, reply.ok_flag());
            Ok(None)
        }
        Err(PuffinError::AccessorFailure { operation, message }) => {
            tracing::warn!("{} failed: {}", operation, message);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::test_support::{accessor_for, bundle, context_for, healthy};

    fn text(output: ProbeOutput) -> String {
        output.as_text().expect("text output").to_string()
    }

    #[test]
    fn arch_reports_bits_unmodified() {
        let (ctx, accessor) = healthy();
        assert_eq!(text(arch(&ctx, &accessor, &[]).unwrap()), "64");
    }

    #[test]
    fn uname_joins_type_hostname_and_kernel() {
        let (ctx, accessor) = healthy();
        assert_eq!(
            text(uname(&ctx, &accessor, &[]).unwrap()),
            "Linux db1.example.com Linux version 5.15.0-91-generic"
        );
    }

    #[test]
    fn uname_without_extra_section() {
        let mut bundle = bundle();
        bundle["hostInfo"].as_object_mut().unwrap().remove("extra");
        let accessor = accessor_for(bundle);
        let ctx = context_for(&accessor);
        assert_eq!(
            text(uname(&ctx, &accessor, &[]).unwrap()),
            "Linux db1.example.com "
        );
    }

    #[test]
    fn os_joins_name_type_and_version() {
        let (ctx, accessor) = healthy();
        assert_eq!(
            text(os(&ctx, &accessor, &[]).unwrap()),
            "Ubuntu Linux 22.04"
        );
    }

    #[test]
    fn time_keeps_reported_timezone() {
        let (ctx, accessor) = healthy();
        assert_eq!(
            text(time(&ctx, &accessor, &[]).unwrap()),
            "Tue Mar 05 2024 14:07:09 GMT+0000"
        );
    }

    #[test]
    fn mname_includes_revision() {
        let (ctx, accessor) = healthy();
        assert_eq!(
            text(mname(&ctx, &accessor, &[]).unwrap()),
            "MongoDB 5.0.9 6f7dae919422dcd7f4892c10ff20cdc721ad00e6"
        );
    }

    #[test]
    fn mname_without_revision() {
        let mut bundle = bundle();
        bundle["buildInfo"]
            .as_object_mut()
            .unwrap()
            .remove("gitVersion");
        let accessor = accessor_for(bundle);
        let ctx = context_for(&accessor);
        assert_eq!(
            text(mname(&ctx, &accessor, &[]).unwrap()),
            "MongoDB 5.0.9 unknown"
        );
    }

    #[test]
    fn host_probes_do_not_refetch() {
        let (ctx, accessor) = healthy();
        let before = accessor.calls().len();
        uname(&ctx, &accessor, &[]).unwrap();
        os(&ctx, &accessor, &[]).unwrap();
        mname(&ctx, &accessor, &[]).unwrap();
        assert_eq!(accessor.calls().len(), before);
    }

    #[test]
    fn cmd_line_opts_joins_argv() {
        let (ctx, accessor) = healthy();
        assert_eq!(
            text(cmd_line_opts(&ctx, &accessor, &[]).unwrap()),
            "mongod --config /etc/mongod.conf"
        );
    }

    #[test]
    fn cmd_line_opts_failure_is_empty() {
        let mut bundle = bundle();
        bundle["commands"]["getCmdLineOpts"] = serde_json::json!({
            "ok": 0,
            "errmsg": "not authorized on admin to execute command"
        });
        let accessor = accessor_for(bundle);
        let ctx = context_for(&accessor);
        assert_eq!(
            cmd_line_opts(&ctx, &accessor, &[]).unwrap(),
            ProbeOutput::Empty
        );
    }

    #[test]
    fn cmd_line_opts_unavailable_is_empty() {
        let mut bundle = bundle();
        bundle["commands"]
            .as_object_mut()
            .unwrap()
            .remove("getCmdLineOpts");
        let accessor = accessor_for(bundle);
        let ctx = context_for(&accessor);
        assert_eq!(
            cmd_line_opts(&ctx, &accessor, &[]).unwrap(),
            ProbeOutput::Empty
        );
    }

    #[test]
    fn storage_engines_one_per_line() {
        let (ctx, accessor) = healthy();
        assert_eq!(
            text(storage_engines(&ctx, &accessor, &[]).unwrap()),
            "devnull\nephemeralForTest\nwiredTiger"
        );
    }

    #[test]
    fn storage_engines_failure_is_empty() {
        let mut bundle = bundle();
        bundle["buildInfo"]["ok"] = serde_json::json!(0);
        let accessor = accessor_for(bundle);
        let ctx = context_for(&accessor);
        assert_eq!(
            storage_engines(&ctx, &accessor, &[]).unwrap(),
            ProbeOutput::Empty
        );
    }
}
