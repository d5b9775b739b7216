//! Settings schema.
//!
//! Maps the YAML settings file onto [`Settings`]. Every field has a default,
//! so an empty file (or no file) is valid.

use serde::{Deserialize, Serialize};

/// Resolved settings for a puffin session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Connection string of the server to inspect.
    pub uri: String,

    /// Path or name of the `mongosh` executable.
    pub mongosh: String,

    /// Server selection timeout handed to the shell, in milliseconds.
    pub connect_timeout_ms: u64,

    /// Hard limit on a single shell invocation, in seconds.
    pub command_timeout_secs: u64,

    /// Round-trips at or above this many milliseconds are flagged by `ping`.
    pub high_latency_ms: u64,

    /// Force the managed-hosting capability on or off instead of detecting it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub managed_hosting: Option<bool>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            uri: "mongodb://localhost:27017".to_string(),
            mongosh: "mongosh".to_string(),
            connect_timeout_ms: 5000,
            command_timeout_secs: 30,
            high_latency_ms: 100,
            managed_hosting: None,
        }
    }
}

/// Values supplied on the command line (or their environment variables).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsOverrides {
    pub uri: Option<String>,
    pub mongosh: Option<String>,
    pub managed_hosting: Option<bool>,
}

impl Settings {
    /// Layer command-line values over these settings.
    pub fn apply(&mut self, overrides: &SettingsOverrides) {
        if let Some(uri) = &overrides.uri {
            self.uri = uri.clone();
        }
        if let Some(mongosh) = &overrides.mongosh {
            self.mongosh = mongosh.clone();
        }
        if overrides.managed_hosting.is_some() {
            self.managed_hosting = overrides.managed_hosting;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = Settings::default();
        assert_eq!(settings.uri, "mongodb://localhost:27017");
        assert_eq!(settings.mongosh, "mongosh");
        assert_eq!(settings.high_latency_ms, 100);
        assert!(settings.managed_hosting.is_none());
    }

    #[test]
    fn partial_yaml_keeps_other_defaults() {
        let settings: Settings = serde_yaml::from_str("high_latency_ms: 40").unwrap();
        assert_eq!(settings.high_latency_ms, 40);
        assert_eq!(settings.command_timeout_secs, 30);
    }

    #[test]
    fn overrides_replace_only_given_values() {
        let mut settings = Settings {
            mongosh: "/opt/mongosh/bin/mongosh".to_string(),
            ..Default::default()
        };
        settings.apply(&SettingsOverrides {
            uri: Some("mongodb://db2:27017".to_string()),
            ..Default::default()
        });
        assert_eq!(settings.uri, "mongodb://db2:27017");
        assert_eq!(settings.mongosh, "/opt/mongosh/bin/mongosh");
    }

    #[test]
    fn managed_hosting_override() {
        let mut settings = Settings {
            managed_hosting: Some(false),
            ..Default::default()
        };
        settings.apply(&SettingsOverrides {
            managed_hosting: Some(true),
            ..Default::default()
        });
        assert_eq!(settings.managed_hosting, Some(true));

        settings.apply(&SettingsOverrides::default());
        assert_eq!(settings.managed_hosting, Some(true));
    }
}
