//! Live runtime probes: uptime, memory, cache, transactions, round-trips.
//!
//! All of these fetch server status (or run a command) on every call.

use std::time::Instant;

use chrono::{NaiveTime, Timelike};
use serde_json::json;

use crate::accessor::SnapshotAccessor;
use crate::error::Result;
use crate::render::{format_mb, render_pairs};
use crate::snapshot::{GlobalLock, MemoryStats, TransactionStats, WiredTigerCache};

use super::{ProbeContext, ProbeOutput};

const SECONDS_PER_DAY: u64 = 86_400;
const SECONDS_PER_HOUR: u64 = 3_600;
const SECONDS_PER_MINUTE: u64 = 60;

/// Reported in place of an average with no samples behind it.
pub const NO_DATA: &str = "N/A";

/// Uptime split into whole days, hours of day and minutes of hour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UptimeParts {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
}

/// Floor-divide an uptime in seconds. Leftover seconds are dropped.
pub fn decompose_uptime(seconds: f64) -> UptimeParts {
    let seconds = seconds.max(0.0).floor() as u64;
    UptimeParts {
        days: seconds / SECONDS_PER_DAY,
        hours: (seconds % SECONDS_PER_DAY) / SECONDS_PER_HOUR,
        minutes: (seconds % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE,
    }
}

/// `HH:MM  up D days, H:MM, clients: T/R/W, queue: T/R/W`.
pub fn format_uptime(clock: NaiveTime, uptime_seconds: f64, lock: &GlobalLock) -> String {
    let parts = decompose_uptime(uptime_seconds);
    format!(
        "{:02}:{:02}  up {} days, {}:{:02}, clients: {}, queue: {}",
        clock.hour(),
        clock.minute(),
        parts.days,
        parts.hours,
        parts.minutes,
        lock.active_clients.triple(),
        lock.current_queue.triple()
    )
}

/// Percentage of started transactions that aborted, rounded.
///
/// Zero when nothing has started.
pub fn abort_rate(started: u64, aborted: u64) -> f64 {
    if started == 0 {
        return 0.0;
    }
    (aborted as f64 * 100.0 / started as f64).round()
}

/// Mean milliseconds per operation, or `None` without operations.
pub fn average_ms(total_ms: f64, count: u64) -> Option<f64> {
    if count == 0 {
        None
    } else {
        Some(total_ms / count as f64)
    }
}

/// `P0NG! <ms>ms, ok: <ok>`, flagged when at or over the threshold.
pub fn format_ping(elapsed_ms: u64, ok: f64, high_latency_ms: u64) -> String {
    let mut line = format!("P0NG! {}ms, ok: {}", elapsed_ms, ok);
    if elapsed_ms >= high_latency_ms {
        line.push_str(", high latency");
    }
    line
}

/// Uptime summary in the style of `uptime(1)`.
pub fn uptime(
    _ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    let status = accessor.server_status()?;
    let seconds = status.number("uptime")?;
    let lock: GlobalLock = status.section("globalLock")?;
    let clock = chrono::Local::now().time();
    Ok(ProbeOutput::Text(format_uptime(clock, seconds, &lock)))
}

/// Process memory and configured cache size.
pub fn mem(
    _ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    let status = accessor.server_status()?;
    let mem: MemoryStats = status.section("mem")?;
    let cache: WiredTigerCache = status.section("wiredTiger.cache")?;

    Ok(ProbeOutput::Text(render_pairs([
        ("virtual", format!("{} MB", mem.virtual_mb)),
        ("resident", format!("{} MB", mem.resident_mb)),
        ("cache", format!("{} MB", format_mb(cache.max_bytes))),
    ])))
}

/// Cache size with disk read/write counts, times and averages.
pub fn cache(
    _ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    let status = accessor.server_status()?;
    let cache: WiredTigerCache = status.section("wiredTiger.cache")?;

    let read_ms = cache.disk_read_usecs as f64 / 1000.0;
    let write_ms = cache.disk_write_usecs as f64 / 1000.0;
    let average = |total: f64, count: u64| match average_ms(total, count) {
        Some(avg) => format!("{:.2} ms", avg),
        None => NO_DATA.to_string(),
    };

    Ok(ProbeOutput::Text(render_pairs([
        ("cache size", format!("{} MB", format_mb(cache.max_bytes))),
        ("disk reads", cache.disk_read_count.to_string()),
        ("disk writes", cache.disk_write_count.to_string()),
        ("disk read time", format!("{} ms", read_ms.round())),
        ("disk write time", format!("{} ms", write_ms.round())),
        ("avg read", average(read_ms, cache.disk_read_count)),
        ("avg write", average(write_ms, cache.disk_write_count)),
    ])))
}

/// Transaction counts and abort rate.
pub fn txn(
    _ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    let status = accessor.server_status()?;
    let stats: TransactionStats = status.section("transactions")?;
    let rate = abort_rate(stats.total_started, stats.total_aborted);

    Ok(ProbeOutput::Text(render_pairs([
        ("started", stats.total_started.to_string()),
        ("aborted", stats.total_aborted.to_string()),
        ("committed", stats.total_committed.to_string()),
        ("abort rate", format!("{}%", rate)),
    ])))
}

/// Time a `ping` round-trip.
pub fn ping(
    ctx: &ProbeContext,
    accessor: &dyn SnapshotAccessor,
    _args: &[String],
) -> Result<ProbeOutput> {
    let start = Instant::now();
    let reply = accessor.run_admin_command(&json!({"ping": 1}))?;
    let elapsed_ms = start.elapsed().as_millis() as u64;

    tracing::debug!("ping answered in {}ms", elapsed_ms);
    Ok(ProbeOutput::Text(format_ping(
        elapsed_ms,
        reply.ok_flag(),
        ctx.settings().high_latency_ms,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::probes::test_support::{accessor_for, bundle, context_for, healthy};
    use crate::snapshot::ClientCounts;
    use regex::Regex;
    use serde_json::json;
    use std::time::Duration;

    fn text(output: ProbeOutput) -> String {
        output.as_text().expect("text output").to_string()
    }

    fn lock() -> GlobalLock {
        GlobalLock {
            active_clients: ClientCounts {
                total: 12,
                readers: 0,
                writers: 1,
            },
            current_queue: ClientCounts {
                total: 0,
                readers: 0,
                writers: 0,
            },
        }
    }

    #[test]
    fn decomposes_one_day_one_hour_one_minute() {
        assert_eq!(
            decompose_uptime(90061.0),
            UptimeParts {
                days: 1,
                hours: 1,
                minutes: 1
            }
        );
    }

    #[test]
    fn decomposition_floors_without_carry() {
        assert_eq!(
            decompose_uptime(3599.9),
            UptimeParts {
                days: 0,
                hours: 0,
                minutes: 59
            }
        );
        assert_eq!(
            decompose_uptime(86399.0),
            UptimeParts {
                days: 0,
                hours: 23,
                minutes: 59
            }
        );
    }

    #[test]
    fn uptime_line_format() {
        let clock = NaiveTime::from_hms_opt(9, 5, 0).unwrap();
        assert_eq!(
            format_uptime(clock, 90061.0, &lock()),
            "09:05  up 1 days, 1:01, clients: 12/0/1, queue: 0/0/0"
        );
    }

    #[test]
    fn uptime_pads_minutes_only() {
        let clock = NaiveTime::from_hms_opt(23, 59, 0).unwrap();
        assert_eq!(
            format_uptime(clock, 36000.0 + 540.0, &lock()),
            "23:59  up 0 days, 10:09, clients: 12/0/1, queue: 0/0/0"
        );
    }

    #[test]
    fn uptime_probe_uses_live_status() {
        let (ctx, accessor) = healthy();
        let out = text(uptime(&ctx, &accessor, &[]).unwrap());
        let pattern =
            Regex::new(r"^\d{2}:\d{2}  up 1 days, 1:01, clients: 12/0/1, queue: 0/0/0$").unwrap();
        assert!(pattern.is_match(&out), "unexpected uptime line: {out}");
        assert_eq!(accessor.calls().last().unwrap(), "admin:serverStatus");
    }

    #[test]
    fn uptime_refetches_on_every_call() {
        let (ctx, accessor) = healthy();
        let before = accessor.calls().len();
        uptime(&ctx, &accessor, &[]).unwrap();
        uptime(&ctx, &accessor, &[]).unwrap();
        assert_eq!(accessor.calls().len(), before + 2);
    }

    #[test]
    fn abort_rate_with_no_transactions_is_zero() {
        assert_eq!(abort_rate(0, 0), 0.0);
        assert_eq!(abort_rate(0, 7), 0.0);
    }

    #[test]
    fn abort_rate_rounds() {
        assert_eq!(abort_rate(100, 25), 25.0);
        assert_eq!(abort_rate(3, 1), 33.0);
        assert_eq!(abort_rate(3, 2), 67.0);
    }

    #[test]
    fn txn_report_lines_in_order() {
        let (ctx, accessor) = healthy();
        assert_eq!(
            text(txn(&ctx, &accessor, &[]).unwrap()),
            "started: 100\naborted: 25\ncommitted: 75\nabort rate: 25%"
        );
    }

    #[test]
    fn txn_with_nothing_started() {
        let mut bundle = bundle();
        bundle["serverStatus"]["transactions"] =
            json!({"totalStarted": 0, "totalAborted": 0, "totalCommitted": 0});
        let accessor = accessor_for(bundle);
        let ctx = context_for(&accessor);
        assert!(text(txn(&ctx, &accessor, &[]).unwrap()).ends_with("abort rate: 0%"));
    }

    #[test]
    fn txn_prints_long_counters_exactly() {
        let mut bundle = bundle();
        bundle["serverStatus"]["transactions"] = json!({
            "totalStarted": {"$numberLong": "9007199254740993"},
            "totalAborted": {"$numberLong": "0"},
            "totalCommitted": {"$numberLong": "9007199254740993"}
        });
        let accessor = accessor_for(bundle);
        let ctx = context_for(&accessor);
        assert_eq!(
            text(txn(&ctx, &accessor, &[]).unwrap()),
            "started: 9007199254740993\n\
             aborted: 0\n\
             committed: 9007199254740993\n\
             abort rate: 0%"
        );
    }

    #[test]
    fn mem_report() {
        let (ctx, accessor) = healthy();
        assert_eq!(
            text(mem(&ctx, &accessor, &[]).unwrap()),
            "virtual: 1530 MB\nresident: 98 MB\ncache: 256 MB"
        );
    }

    #[test]
    fn cache_report_with_zero_writes() {
        let (ctx, accessor) = healthy();
        assert_eq!(
            text(cache(&ctx, &accessor, &[]).unwrap()),
            "cache size: 256 MB\n\
             disk reads: 4\n\
             disk writes: 0\n\
             disk read time: 10 ms\n\
             disk write time: 0 ms\n\
             avg read: 2.50 ms\n\
             avg write: N/A"
        );
    }

    #[test]
    fn average_without_samples_is_none() {
        assert_eq!(average_ms(12.0, 0), None);
        assert_eq!(average_ms(12.0, 4), Some(3.0));
    }

    #[test]
    fn cache_without_wiredtiger_is_shape_error() {
        let mut bundle = bundle();
        bundle["serverStatus"]
            .as_object_mut()
            .unwrap()
            .remove("wiredTiger");
        let accessor = accessor_for(bundle);
        let ctx = context_for(&accessor);
        let err = cache(&ctx, &accessor, &[]).unwrap_err();
        assert!(err.is_snapshot_shape());
    }

    #[test]
    fn ping_line_format() {
        assert_eq!(format_ping(3, 1.0, 100), "P0NG! 3ms, ok: 1");
        assert_eq!(format_ping(99, 1.0, 100), "P0NG! 99ms, ok: 1");
        assert_eq!(format_ping(100, 1.0, 100), "P0NG! 100ms, ok: 1, high latency");
        assert_eq!(format_ping(250, 0.0, 100), "P0NG! 250ms, ok: 0, high latency");
    }

    #[test]
    fn ping_probe_reports_ok() {
        let (ctx, accessor) = healthy();
        let out = text(ping(&ctx, &accessor, &[]).unwrap());
        assert!(out.starts_with("P0NG! "));
        assert!(out.contains("ok: 1"));
    }

    #[test]
    fn slow_ping_is_flagged() {
        let accessor = accessor_for(bundle());
        let ctx = context_for(&accessor);
        let slow = accessor.with_latency(Duration::from_millis(120));
        let out = text(ping(&ctx, &slow, &[]).unwrap());
        assert!(out.ends_with(", high latency"), "{out}");
    }

    #[test]
    fn ping_propagates_accessor_failure() {
        let mut bundle = bundle();
        bundle["commands"].as_object_mut().unwrap().remove("ping");
        let accessor = accessor_for(bundle);
        let ctx = context_for(&accessor);
        assert!(ping(&ctx, &accessor, &[]).is_err());
    }
}
