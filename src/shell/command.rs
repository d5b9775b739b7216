//! External command execution.
//!
//! Runs a program directly (no intermediate shell, so arguments never need
//! quoting), captures its output, and enforces an optional timeout.

use crate::error::{PuffinError, Result};
use std::io::Read;
use std::process::{Child, Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

/// How often a running child is polled while a timeout is armed.
const POLL_INTERVAL: Duration = Duration::from_millis(10);

/// Result of executing an external command.
#[derive(Debug, Clone)]
pub struct CommandResult {
    /// Exit code (None if killed by signal or timeout).
    pub exit_code: Option<i32>,

    /// Standard output.
    pub stdout: String,

    /// Standard error.
    pub stderr: String,

    /// Execution duration.
    pub duration: Duration,

    /// Whether command succeeded (exit code 0).
    pub success: bool,

    /// Whether the command was killed for exceeding its timeout.
    pub timed_out: bool,
}

impl CommandResult {
    /// Create a success result.
    pub fn success(stdout: String, stderr: String, duration: Duration) -> Self {
        Self {
            exit_code: Some(0),
            stdout,
            stderr,
            duration,
            success: true,
            timed_out: false,
        }
    }

    /// Create a failure result.
    pub fn failure(
        exit_code: Option<i32>,
        stdout: String,
        stderr: String,
        duration: Duration,
    ) -> Self {
        Self {
            exit_code,
            stdout,
            stderr,
            duration,
            success: false,
            timed_out: false,
        }
    }
}

/// Options for command execution.
#[derive(Debug, Clone, Default)]
pub struct CommandOptions {
    /// Timeout (None = wait indefinitely).
    pub timeout: Option<Duration>,
}

/// Execute `program` with `args`, capturing stdout and stderr.
///
/// A non-zero exit is reported through [`CommandResult::success`], not as an
/// error. Errors are reserved for failing to start the program at all.
pub fn execute(program: &str, args: &[String], options: &CommandOptions) -> Result<CommandResult> {
    let start = Instant::now();

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    tracing::debug!("Executing {} with {} argument(s)", program, args.len());

    let mut child = cmd.spawn().map_err(|e| {
        PuffinError::accessor(program.to_string(), format!("could not start: {}", e))
    })?;

    let stdout_handle = spawn_reader(child.stdout.take());
    let stderr_handle = spawn_reader(child.stderr.take());

    let (status, timed_out) = wait(&mut child, options.timeout, program)?;

    let stdout = stdout_handle.join().unwrap_or_default();
    let stderr = stderr_handle.join().unwrap_or_default();
    let duration = start.elapsed();

    tracing::debug!("{} finished in {:?}", program, duration);

    if timed_out {
        let mut result = CommandResult::failure(None, stdout, stderr, duration);
        result.timed_out = true;
        return Ok(result);
    }

    match status {
        Some(status) if status.success() => Ok(CommandResult::success(stdout, stderr, duration)),
        Some(status) => Ok(CommandResult::failure(
            status.code(),
            stdout,
            stderr,
            duration,
        )),
        None => Ok(CommandResult::failure(None, stdout, stderr, duration)),
    }
}

/// Drain a child pipe on its own thread so a chatty child never blocks.
fn spawn_reader<R>(pipe: Option<R>) -> thread::JoinHandle<String>
where
    R: Read + Send + 'static,
{
    thread::spawn(move || {
        let mut output = String::new();
        if let Some(mut pipe) = pipe {
            let mut bytes = Vec::new();
            if pipe.read_to_end(&mut bytes).is_ok() {
                output = String::from_utf8_lossy(&bytes).to_string();
            }
        }
        output
    })
}

/// Wait for the child, killing it once `timeout` elapses.
fn wait(
    child: &mut Child,
    timeout: Option<Duration>,
    program: &str,
) -> Result<(Option<std::process::ExitStatus>, bool)> {
    let wait_error =
        |e: std::io::Error| PuffinError::accessor(program.to_string(), format!("wait failed: {}", e));

    let Some(timeout) = timeout else {
        return child.wait().map(|s| (Some(s), false)).map_err(wait_error);
    };

    let deadline = Instant::now() + timeout;
    loop {
        if let Some(status) = child.try_wait().map_err(wait_error)? {
            return Ok((Some(status), false));
        }
        if Instant::now() >= deadline {
            tracing::warn!("{} exceeded its {:?} timeout; killing it", program, timeout);
            let _ = child.kill();
            let _ = child.wait();
            return Ok((None, true));
        }
        thread::sleep(POLL_INTERVAL);
    }
}
