//! A connected console session.
//!
//! Resolves settings, picks an accessor, captures the probe context and
//! discovers the registry. Commands that talk to a server share this.

use std::path::Path;

use crate::accessor::{FixtureAccessor, MongoshAccessor, SnapshotAccessor};
use crate::cli::args::Cli;
use crate::config::{load_settings, Settings};
use crate::error::Result;
use crate::probes::identity::redact_uri;
use crate::probes::{ProbeContext, ProbeOutput, PUBLIC_PROBES};
use crate::registry::CommandRegistry;

/// Accessor, context and registry for one console run.
pub struct Session {
    accessor: Box<dyn SnapshotAccessor>,
    context: ProbeContext,
    registry: CommandRegistry,
}

impl Session {
    /// Open a session from command-line options.
    pub fn open(cli: &Cli, cwd: &Path) -> Result<Self> {
        let mut settings = load_settings(cli.config.as_deref(), cwd)?;
        settings.apply(&cli.overrides());

        let accessor: Box<dyn SnapshotAccessor> = match &cli.snapshot {
            Some(path) => Box::new(FixtureAccessor::from_file(path)?),
            None => {
                tracing::debug!(
                    "Connecting through {} to {}",
                    settings.mongosh,
                    redact_uri(&settings.uri)
                );
                Box::new(MongoshAccessor::new(&settings))
            }
        };
        Self::with_accessor(accessor, settings)
    }

    /// Open a session over an existing accessor.
    pub fn with_accessor(accessor: Box<dyn SnapshotAccessor>, settings: Settings) -> Result<Self> {
        let context = ProbeContext::capture(accessor.as_ref(), settings)?;
        let registry = CommandRegistry::discover(PUBLIC_PROBES)?;
        Ok(Self {
            accessor,
            context,
            registry,
        })
    }

    /// Run a probe by public name.
    pub fn invoke(&self, name: &str, args: &[String]) -> Result<ProbeOutput> {
        self.registry
            .invoke(name, &self.context, self.accessor.as_ref(), args)
    }

    /// The probe registry.
    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }

    /// The captured probe context.
    pub fn context(&self) -> &ProbeContext {
        &self.context
    }
}
