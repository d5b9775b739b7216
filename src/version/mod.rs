//! Server version parsing and capability gating.
//!
//! - [`ServerVersion`] is parsed once from the build info's dotted version
//! - [`VersionRequirement`] names the components a gated probe depends on
//! - [`requires_at_least`] decides whether a gated probe is blocked

pub mod gate;

pub use gate::{requires_at_least, requires_version_message, VersionRequirement};

use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use regex::Regex;

use crate::error::{PuffinError, Result};

/// Leading `major.minor.patch` of a server version string.
///
/// Anything after the digits of the third component (a pre-release tag or
/// a fourth component) is ignored.
static VERSION_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d+)\.(\d+)\.(\d+)").expect("VERSION_REGEX must compile")
});

/// Version of the connected server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ServerVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
}

impl ServerVersion {
    /// Create a version from its components.
    pub const fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
        }
    }
}

/// Parse a dotted-decimal version string such as `"7.0.2"`.
///
/// Fails with [`PuffinError::MalformedVersion`] when fewer than three
/// numeric components are present.
pub fn parse_version(input: &str) -> Result<ServerVersion> {
    let malformed = || PuffinError::MalformedVersion {
        input: input.to_string(),
    };

    let captures = VERSION_REGEX.captures(input).ok_or_else(malformed)?;
    let component = |idx: usize| -> Result<u32> {
        captures[idx].parse::<u32>().map_err(|_| malformed())
    };

    Ok(ServerVersion {
        major: component(1)?,
        minor: component(2)?,
        patch: component(3)?,
    })
}

impl FromStr for ServerVersion {
    type Err = PuffinError;

    fn from_str(s: &str) -> Result<Self> {
        parse_version(s)
    }
}

impl fmt::Display for ServerVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}
