//! Build info.

use serde::Deserialize;

/// The fields of `buildInfo` the probes report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BuildInfo {
    pub version: String,
    /// Source-control revision. Absent on some packaged builds.
    #[serde(default)]
    pub git_version: Option<String>,
    #[serde(default)]
    pub storage_engines: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn deserializes_build_info() {
        let info: BuildInfo = serde_json::from_value(json!({
            "version": "7.0.2",
            "gitVersion": "02b3c655e1302209ef046da6ba3ef6749dd0b62a",
            "storageEngines": ["devnull", "wiredTiger"],
            "bits": 64
        }))
        .unwrap();
        assert_eq!(info.version, "7.0.2");
        assert_eq!(
            info.git_version.as_deref(),
            Some("02b3c655e1302209ef046da6ba3ef6749dd0b62a")
        );
        assert_eq!(info.storage_engines, vec!["devnull", "wiredTiger"]);
    }

    #[test]
    fn optional_fields_default() {
        let info: BuildInfo = serde_json::from_value(json!({"version": "6.0.0"})).unwrap();
        assert!(info.git_version.is_none());
        assert!(info.storage_engines.is_empty());
    }
}
