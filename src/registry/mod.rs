//! Command registry for the public probe namespace.
//!
//! The [`CommandRegistry`] admits every probe in a declaration list under its
//! public name, validates invocations and reports how many commands are
//! available.
//!
//! # Example
//!
//! ```
//! use puffin::probes::PUBLIC_PROBES;
//! use puffin::registry::CommandRegistry;
//!
//! let registry = CommandRegistry::discover(PUBLIC_PROBES).unwrap();
//! assert_eq!(registry.count(), PUBLIC_PROBES.len());
//! assert!(registry.get("uptime").is_some());
//! assert!(registry.get("parse_version").is_none());
//! ```

use std::collections::HashMap;

use crate::accessor::SnapshotAccessor;
use crate::error::{PuffinError, Result};
use crate::probes::{ProbeContext, ProbeDef, ProbeOutput};

/// Namespace the console exposes probes under.
pub const NAMESPACE: &str = "mp";

/// Probe named in the banner as an example.
pub const EXAMPLE_PROBE: &str = "uptime";

/// Drop an optional `mp.` namespace prefix from a probe name.
pub fn strip_namespace(name: &str) -> &str {
    name.strip_prefix(NAMESPACE)
        .and_then(|rest| rest.strip_prefix('.'))
        .unwrap_or(name)
}

/// Registry of invocable probes.
#[derive(Debug, Default)]
pub struct CommandRegistry {
    probes: Vec<ProbeDef>,
    index: HashMap<&'static str, usize>,
}

impl CommandRegistry {
    /// Admit every probe in `declared`, in order.
    ///
    /// Fails on the first name declared twice.
    pub fn discover(declared: &[ProbeDef]) -> Result<Self> {
        let mut registry = Self::default();
        for probe in declared {
            registry.register(*probe)?;
        }
        tracing::debug!("Registered {} probes", registry.count());
        Ok(registry)
    }

    fn register(&mut self, probe: ProbeDef) -> Result<()> {
        if self.index.contains_key(probe.name) {
            return Err(PuffinError::DuplicateProbe {
                name: probe.name.to_string(),
            });
        }
        self.index.insert(probe.name, self.probes.len());
        self.probes.push(probe);
        Ok(())
    }

    /// Number of admitted probes.
    pub fn count(&self) -> usize {
        self.probes.len()
    }

    /// Look up a probe by public name.
    pub fn get(&self, name: &str) -> Option<&ProbeDef> {
        self.index.get(name).map(|&i| &self.probes[i])
    }

    /// Iterate over probes in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = &ProbeDef> {
        self.probes.iter()
    }

    /// Run the named probe.
    ///
    /// A probe that trips over a snapshot lacking the fields it reads yields
    /// an [`ProbeOutput::Unsupported`] naming the probe rather than an error.
    pub fn invoke(
        &self,
        name: &str,
        ctx: &ProbeContext,
        accessor: &dyn SnapshotAccessor,
        args: &[String],
    ) -> Result<ProbeOutput> {
        let name = strip_namespace(name);
        let probe = self.get(name).ok_or_else(|| PuffinError::UnknownProbe {
            name: name.to_string(),
        })?;

        if args.len() != probe.params.len() {
            return Err(PuffinError::InvalidArguments {
                probe: probe.name.to_string(),
                expected: probe.params.len(),
                got: args.len(),
                usage: probe.usage(),
            });
        }

        tracing::debug!("Invoking {} with {:?}", probe.name, args);
        match (probe.run)(ctx, accessor, args) {
            Err(e) if e.is_snapshot_shape() => {
                tracing::warn!("{} could not read its snapshot: {}", probe.name, e);
                Ok(ProbeOutput::Unsupported(format!("{}: {}", probe.name, e)))
            }
            other => other,
        }
    }

    /// Lines printed when the console starts.
    pub fn banner(&self) -> Vec<String> {
        vec![
            format!("Loaded puffin v{}", env!("CARGO_PKG_VERSION")),
            format!(
                "You will find commands under the '{}' namespace. Example: {}",
                NAMESPACE, EXAMPLE_PROBE
            ),
            format!("Number of commands available: {}", self.count()),
        ]
    }
}
