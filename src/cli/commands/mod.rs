//! CLI command implementations.
//!
//! Each command implements the [`Command`] trait, which provides a uniform
//! interface for executing commands and reporting results.
//!
//! # Architecture
//!
//! Commands are dispatched via [`CommandDispatcher`], which routes CLI
//! subcommands to their implementations and opens a [`Session`] for the
//! ones that talk to a server.
//!
//! [`Session`]: crate::cli::session::Session

pub mod completions;
pub mod dispatcher;
pub mod display;
pub mod list;
pub mod run;
pub mod shell;

pub use dispatcher::{Command, CommandDispatcher, CommandResult, EXIT_USAGE};
