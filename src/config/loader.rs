//! Settings file discovery and loading.

use crate::config::schema::Settings;
use crate::error::{PuffinError, Result};
use std::fs;
use std::path::Path;

/// Settings file picked up from the working directory when present.
pub const LOCAL_SETTINGS_FILE: &str = ".puffin.yml";

/// Load settings for a session.
///
/// An explicitly named file must exist. Without one, `.puffin.yml` in `cwd`
/// is used if present, and built-in defaults otherwise.
pub fn load_settings(explicit: Option<&Path>, cwd: &Path) -> Result<Settings> {
    if let Some(path) = explicit {
        return load_settings_file(path);
    }

    let local = cwd.join(LOCAL_SETTINGS_FILE);
    if local.is_file() {
        return load_settings_file(&local);
    }

    tracing::debug!("No settings file found; using defaults");
    Ok(Settings::default())
}

/// Load a settings file from disk.
pub fn load_settings_file(path: &Path) -> Result<Settings> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == std::io::ErrorKind::NotFound {
            PuffinError::ConfigNotFound {
                path: path.to_path_buf(),
            }
        } else {
            PuffinError::Io(e)
        }
    })?;

    tracing::debug!("Loading settings from {}", path.display());
    parse_settings(&content, path)
}

/// Parse YAML content into [`Settings`].
///
/// # Arguments
///
/// * `content` - The YAML content to parse
/// * `source_path` - Path for error reporting
pub fn parse_settings(content: &str, source_path: &Path) -> Result<Settings> {
    if content.trim().is_empty() {
        return Ok(Settings::default());
    }
    serde_yaml::from_str(content).map_err(|e| PuffinError::ConfigParseError {
        path: source_path.to_path_buf(),
        message: e.to_string(),
    })
}
