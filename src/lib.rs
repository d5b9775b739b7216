//! Puffin - diagnostic probes for an operator console attached to a MongoDB
//! server.
//!
//! Puffin exposes a flat namespace of probes (uptime, memory, cache,
//! transactions, counters, identity and more) that turn server snapshots
//! into short human-readable reports.
//!
//! # Modules
//!
//! - [`accessor`] - Snapshot accessor trait, `mongosh` and fixture backends
//! - [`cli`] - Command-line interface and argument parsing
//! - [`config`] - Settings loading
//! - [`error`] - Error types and result aliases
//! - [`probes`] - The diagnostic probes and their shared context
//! - [`registry`] - Public probe namespace and invocation
//! - [`render`] - Dictionary rendering of snapshot sections
//! - [`shell`] - External process execution
//! - [`snapshot`] - Typed views over server documents
//! - [`ui`] - Terminal output
//! - [`version`] - Server version parsing and capability gating
//!
//! # Example
//!
//! ```
//! use puffin::render::render;
//! use serde_json::json;
//!
//! let counters = json!({"insert": 3, "query": 12});
//! assert_eq!(render(counters.as_object().unwrap()), "insert: 3\nquery: 12");
//! ```
//!
//! For running probes against a snapshot bundle, see the integration tests.

pub mod accessor;
pub mod cli;
pub mod config;
pub mod error;
pub mod probes;
pub mod registry;
pub mod render;
pub mod shell;
pub mod snapshot;
pub mod ui;
pub mod version;

pub use error::{PuffinError, Result};
