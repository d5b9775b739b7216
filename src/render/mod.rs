//! Text rendering for probe reports.
//!
//! - [`dictionary`] - `key: value` line rendering for arbitrary counter groups
//! - [`value`] - display form of individual snapshot values

pub mod dictionary;
pub mod value;

pub use dictionary::{render, render_pairs, render_scalars};
pub use value::{display_value, format_mb, BYTES_PER_MB};
