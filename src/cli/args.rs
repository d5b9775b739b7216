//! CLI argument definitions.
//!
//! This module defines all CLI arguments using clap's derive macros.
//! The main entry point is the [`Cli`] struct.

use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::fmt;
use std::path::PathBuf;

use crate::config::SettingsOverrides;
use crate::probes::identity::redact_uri;

/// Puffin - diagnostic probes for a MongoDB server.
#[derive(Parser)]
#[command(name = "puffin")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Connection string of the server to inspect
    #[arg(long, global = true, env = "PUFFIN_URI")]
    pub uri: Option<String>,

    /// Path to the mongosh executable
    #[arg(long, global = true, env = "PUFFIN_MONGOSH", value_name = "PATH")]
    pub mongosh: Option<String>,

    /// Serve probes from a captured snapshot bundle instead of a live server
    #[arg(long, global = true, value_name = "FILE")]
    pub snapshot: Option<PathBuf>,

    /// Path to settings file (overrides ./.puffin.yml)
    #[arg(short, long, global = true, env = "PUFFIN_CONFIG")]
    pub config: Option<PathBuf>,

    /// Force the managed-hosting capability on or off
    #[arg(long, global = true, value_name = "BOOL")]
    pub managed_hosting: Option<bool>,

    /// Emit each result as a JSON object
    #[arg(long, global = true)]
    pub json: bool,

    /// Print probe output only
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Enable debug logging
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Settings supplied on the command line.
    pub fn overrides(&self) -> SettingsOverrides {
        SettingsOverrides {
            uri: self.uri.clone(),
            mongosh: self.mongosh.clone(),
            managed_hosting: self.managed_hosting,
        }
    }
}

// Hand-written so debug logs never carry a connection password.
impl fmt::Debug for Cli {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cli")
            .field("uri", &self.uri.as_deref().map(redact_uri))
            .field("mongosh", &self.mongosh)
            .field("snapshot", &self.snapshot)
            .field("config", &self.config)
            .field("managed_hosting", &self.managed_hosting)
            .field("json", &self.json)
            .field("quiet", &self.quiet)
            .field("no_color", &self.no_color)
            .field("debug", &self.debug)
            .field("command", &self.command)
            .finish()
    }
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Run a single probe
    Run(RunArgs),

    /// List available probes
    List,

    /// Read probe invocations from stdin, one per line
    Shell,

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `run` command.
#[derive(Debug, Clone, clap::Args)]
pub struct RunArgs {
    /// Probe to run (see `puffin list`)
    pub probe: String,

    /// Probe arguments
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    pub args: Vec<String>,
}

/// Arguments for the `completions` command.
#[derive(Debug, Clone, clap::Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
