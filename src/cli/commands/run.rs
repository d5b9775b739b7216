//! Run command implementation.
//!
//! The `puffin run <probe> [args...]` command invokes one probe.

use crate::cli::args::RunArgs;
use crate::cli::session::Session;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{is_usage_error, Command, CommandResult, EXIT_USAGE};
use super::display::{show_output, show_usage_error};

/// The run command implementation.
pub struct RunCommand<'a> {
    session: &'a Session,
    args: RunArgs,
    json: bool,
}

impl<'a> RunCommand<'a> {
    /// Create a new run command.
    pub fn new(session: &'a Session, args: RunArgs, json: bool) -> Self {
        Self {
            session,
            args,
            json,
        }
    }
}

impl Command for RunCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        match self.session.invoke(&self.args.probe, &self.args.args) {
            Ok(output) => {
                show_output(ui, &self.args.probe, &output, self.json)?;
                Ok(CommandResult::success())
            }
            Err(e) if is_usage_error(&e) => {
                show_usage_error(ui, &e);
                Ok(CommandResult::failure(EXIT_USAGE))
            }
            Err(e) => Err(e),
        }
    }
}
