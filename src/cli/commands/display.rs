//! Shared display helpers for probe results.
//!
//! Used by `run` and `shell` so a result looks the same whichever way the
//! probe was invoked.

use serde_json::{json, Value};

use crate::error::{PuffinError, Result};
use crate::probes::ProbeOutput;
use crate::ui::UserInterface;

/// Short status word for a result.
pub fn status_word(output: &ProbeOutput) -> &'static str {
    match output {
        ProbeOutput::Text(_) | ProbeOutput::Document(_) => "ok",
        ProbeOutput::Unsupported(_) => "unsupported",
        ProbeOutput::Empty => "empty",
    }
}

/// A result as a JSON object: `{probe, status, output}`.
pub fn json_envelope(probe: &str, output: &ProbeOutput) -> Value {
    let body = match output {
        ProbeOutput::Text(text) | ProbeOutput::Unsupported(text) => Value::String(text.clone()),
        ProbeOutput::Document(doc) => doc.clone(),
        ProbeOutput::Empty => Value::Null,
    };
    json!({
        "probe": probe,
        "status": status_word(output),
        "output": body,
    })
}

/// Print a probe result.
///
/// Unsupported results are shown as warnings and empty results print
/// nothing.
pub fn show_output(
    ui: &mut dyn UserInterface,
    probe: &str,
    output: &ProbeOutput,
    json: bool,
) -> Result<()> {
    if json {
        let rendered = serde_json::to_string_pretty(&json_envelope(probe, output))?;
        ui.output(&rendered);
        return Ok(());
    }

    match output {
        ProbeOutput::Text(_) | ProbeOutput::Document(_) => ui.output(&output.to_string()),
        ProbeOutput::Unsupported(reason) => ui.warning(reason),
        ProbeOutput::Empty => tracing::debug!("{} returned no data", probe),
    }
    Ok(())
}

/// Print a usage error, with the probe's parameters when known.
pub fn show_usage_error(ui: &mut dyn UserInterface, err: &PuffinError) {
    ui.error(&err.to_string());
    if let PuffinError::UnknownProbe { .. } = err {
        ui.message("Run `puffin list` to see available probes");
    }
}
