//! List command implementation.
//!
//! The `puffin list` command prints the banner and every available probe.

use serde_json::json;

use crate::error::Result;
use crate::probes::PUBLIC_PROBES;
use crate::registry::CommandRegistry;
use crate::ui::UserInterface;

use super::dispatcher::{Command, CommandResult};

/// The list command implementation.
pub struct ListCommand {
    json: bool,
}

impl ListCommand {
    /// Create a new list command.
    pub fn new(json: bool) -> Self {
        Self { json }
    }
}

impl Command for ListCommand {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let registry = CommandRegistry::discover(PUBLIC_PROBES)?;

        if self.json {
            let probes: Vec<_> = registry
                .iter()
                .map(|p| json!({"name": p.name, "params": p.params, "summary": p.summary}))
                .collect();
            ui.output(&serde_json::to_string_pretty(&probes)?);
            return Ok(CommandResult::success());
        }

        for line in registry.banner() {
            ui.message(&line);
        }
        ui.message("");

        let width = registry
            .iter()
            .map(|p| signature(p.name, &p.usage()).len())
            .max()
            .unwrap_or(0);
        for probe in registry.iter() {
            let sig = signature(probe.name, &probe.usage());
            ui.output(&format!("  {:<width$}  {}", sig, probe.summary, width = width));
        }

        Ok(CommandResult::success())
    }
}

fn signature(name: &str, usage: &str) -> String {
    if usage.is_empty() {
        name.to_string()
    } else {
        format!("{} {}", name, usage)
    }
}
