//! Server status sections.
//!
//! Counters go through [`ejson::count`](super::ejson::count) and sizes
//! through [`ejson::number`](super::ejson::number), so relaxed and canonical
//! shell output both deserialize.

use serde::Deserialize;

use super::ejson;

/// A total/readers/writers triple from the global lock section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub struct ClientCounts {
    #[serde(deserialize_with = "ejson::count")]
    pub total: u64,
    #[serde(deserialize_with = "ejson::count")]
    pub readers: u64,
    #[serde(deserialize_with = "ejson::count")]
    pub writers: u64,
}

impl ClientCounts {
    /// Format as `total/readers/writers`.
    pub fn triple(&self) -> String {
        format!("{}/{}/{}", self.total, self.readers, self.writers)
    }
}

/// `globalLock`: who is active and who is waiting.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalLock {
    pub active_clients: ClientCounts,
    pub current_queue: ClientCounts,
}

/// `mem`: process memory in megabytes.
#[derive(Debug, Clone, Deserialize)]
pub struct MemoryStats {
    #[serde(rename = "virtual", deserialize_with = "ejson::number")]
    pub virtual_mb: f64,
    #[serde(rename = "resident", deserialize_with = "ejson::number")]
    pub resident_mb: f64,
}

/// `wiredTiger.cache`: storage engine cache size and disk traffic.
#[derive(Debug, Clone, Deserialize)]
pub struct WiredTigerCache {
    #[serde(
        rename = "maximum bytes configured",
        deserialize_with = "ejson::number"
    )]
    pub max_bytes: f64,
    #[serde(
        rename = "application threads page read from disk to cache count",
        default,
        deserialize_with = "ejson::count"
    )]
    pub disk_read_count: u64,
    #[serde(
        rename = "application threads page read from disk to cache time (usecs)",
        default,
        deserialize_with = "ejson::count"
    )]
    pub disk_read_usecs: u64,
    #[serde(
        rename = "application threads page write from cache to disk count",
        default,
        deserialize_with = "ejson::count"
    )]
    pub disk_write_count: u64,
    #[serde(
        rename = "application threads page write from cache to disk time (usecs)",
        default,
        deserialize_with = "ejson::count"
    )]
    pub disk_write_usecs: u64,
}

/// `transactions`: lifetime transaction counters.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionStats {
    #[serde(deserialize_with = "ejson::count")]
    pub total_started: u64,
    #[serde(deserialize_with = "ejson::count")]
    pub total_aborted: u64,
    #[serde(deserialize_with = "ejson::count")]
    pub total_committed: u64,
}
