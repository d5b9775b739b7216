//! Capability gating against the connected server version.
//!
//! Gating is strict: a requirement blocks a probe unless the
//! server matches every component the requirement names. A requirement of
//! `5.0` admits `5.0.0` through `5.0.x` and nothing else.

use std::fmt;

use super::ServerVersion;

/// The version components a gated probe depends on.
///
/// Components are supplied most-significant first, so a minor can never be
/// given without its major.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionRequirement {
    /// Only the major version must match.
    Major(u32),
    /// Major and minor versions must match.
    MajorMinor(u32, u32),
    /// The full version must match.
    Full(u32, u32, u32),
}

impl VersionRequirement {
    /// Whether `version` matches every component named here.
    pub fn is_met_by(&self, version: &ServerVersion) -> bool {
        match *self {
            Self::Major(major) => version.major == major,
            Self::MajorMinor(major, minor) => version.major == major && version.minor == minor,
            Self::Full(major, minor, patch) => {
                version.major == major && version.minor == minor && version.patch == patch
            }
        }
    }
}

impl fmt::Display for VersionRequirement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Major(major) => write!(f, "{}", major),
            Self::MajorMinor(major, minor) => write!(f, "{}.{}", major, minor),
            Self::Full(major, minor, patch) => write!(f, "{}.{}.{}", major, minor, patch),
        }
    }
}

/// Returns `true` when a probe gated on `requirement` must be blocked.
pub fn requires_at_least(current: &ServerVersion, requirement: VersionRequirement) -> bool {
    let blocked = !requirement.is_met_by(current);
    if blocked {
        tracing::debug!("Server {} does not satisfy {}", current, requirement);
    }
    blocked
}

/// The message a blocked probe returns in place of its report.
pub fn requires_version_message(requirement: VersionRequirement) -> String {
    format!("requires version {}", requirement)
}
