//! Host info sections.

use serde::Deserialize;
use serde_json::Value;

/// The `system` section of host info.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostSystem {
    pub hostname: String,
    /// Host clock at capture time, as the server reported it.
    #[serde(default)]
    pub current_time: Option<Value>,
}

/// The `os` section of host info.
#[derive(Debug, Clone, Deserialize)]
pub struct HostOs {
    #[serde(rename = "type")]
    pub kind: String,
    pub name: String,
    #[serde(default)]
    pub version: String,
}

/// The `extra` section of host info. Its fields vary by platform.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HostExtra {
    #[serde(default)]
    pub version_string: Option<String>,
}
