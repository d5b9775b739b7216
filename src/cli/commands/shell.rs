//! Shell command implementation.
//!
//! The `puffin shell` command prints the startup banner, then runs one probe
//! per input line until end of input or `exit`.

use std::io::{self, BufRead};

use crate::cli::session::Session;
use crate::error::Result;
use crate::ui::UserInterface;

use super::dispatcher::{is_usage_error, Command, CommandResult};
use super::display::{show_output, show_usage_error};

/// Words that end the session.
const EXIT_WORDS: &[&str] = &["exit", "quit"];

/// The shell command implementation.
pub struct ShellCommand<'a> {
    session: &'a Session,
    json: bool,
}

impl<'a> ShellCommand<'a> {
    /// Create a new shell command.
    pub fn new(session: &'a Session, json: bool) -> Self {
        Self { session, json }
    }

    /// Run the console over `input`.
    ///
    /// Failing probes are reported and the console carries on.
    pub fn run_lines<R: BufRead>(&self, input: R, ui: &mut dyn UserInterface) -> Result<()> {
        for line in self.session.registry().banner() {
            ui.message(&line);
        }

        for line in input.lines() {
            let line = line?;
            let words = split_words(&line);
            let Some((name, args)) = words.split_first() else {
                continue;
            };
            if EXIT_WORDS.contains(&name.as_str()) {
                break;
            }

            match self.session.invoke(name, args) {
                Ok(output) => show_output(ui, name, &output, self.json)?,
                Err(e) if is_usage_error(&e) => show_usage_error(ui, &e),
                Err(e) => {
                    tracing::warn!("{} failed: {}", name, e);
                    ui.error(&format!("{}: {}", name, e));
                }
            }
        }
        Ok(())
    }
}

impl Command for ShellCommand<'_> {
    fn execute(&self, ui: &mut dyn UserInterface) -> Result<CommandResult> {
        let stdin = io::stdin();
        self.run_lines(stdin.lock(), ui)?;
        Ok(CommandResult::success())
    }
}

/// Split a console line into words. Double quotes group words.
pub fn split_words(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut started = false;

    for c in line.chars() {
        match c {
            '"' => {
                quoted = !quoted;
                started = true;
            }
            c if c.is_whitespace() && !quoted => {
                if started {
                    words.push(std::mem::take(&mut current));
                    started = false;
                }
            }
            c => {
                current.push(c);
                started = true;
            }
        }
    }
    if started {
        words.push(current);
    }
    words
}
