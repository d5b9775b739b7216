//! Settings loading for puffin.
//!
//! - Schema definitions in [`schema`]
//! - File discovery, parsing and override layering in [`loader`]
//!
//! # Example
//!
//! ```
//! use puffin::config::{parse_settings, SettingsOverrides};
//! use std::path::Path;
//!
//! let mut settings = parse_settings("high_latency_ms: 250", Path::new("puffin.yml")).unwrap();
//! settings.apply(&SettingsOverrides {
//!     uri: Some("mongodb://db1:27017".to_string()),
//!     ..Default::default()
//! });
//! assert_eq!(settings.high_latency_ms, 250);
//! assert_eq!(settings.uri, "mongodb://db1:27017");
//! ```
//!
//! # Settings Locations
//!
//! 1. Built-in defaults
//! 2. `.puffin.yml` in the working directory, or the file named by
//!    `--config` / `PUFFIN_CONFIG`
//! 3. Command-line flags and their environment variables

pub mod loader;
pub mod schema;

pub use loader::{load_settings, load_settings_file, parse_settings, LOCAL_SETTINGS_FILE};
pub use schema::{Settings, SettingsOverrides};
