//! Command-line interface for puffin.
//!
//! This module provides the CLI argument parsing using clap's derive macros
//! and command implementations.
//!
//! # Architecture
//!
//! - [`args`] - Argument definitions using clap derive macros
//! - [`commands`] - Command implementations
//! - [`session`] - Settings, accessor, context and registry for a run

pub mod args;
pub mod commands;
pub mod session;

pub use args::{Cli, Commands, CompletionsArgs, RunArgs};
pub use commands::{Command, CommandDispatcher, CommandResult, EXIT_USAGE};
pub use session::Session;
