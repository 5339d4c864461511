use crate::error::{ReleaseError, Result};
use std::fmt;
use std::str::FromStr;

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// Create a new version
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a bare `MAJOR.MINOR.PATCH` string (e.g., "1.2.3" -> Version(1,2,3))
    ///
    /// Each component must be plain ASCII digits without a leading zero
    /// (a bare `0` is fine) and must fit in a `u64`.
    pub fn parse(input: &str) -> Result<Self> {
        let parts: Vec<&str> = input.split('.').collect();
        if parts.len() != 3 {
            return Err(ReleaseError::format(format!(
                "'{}' - expected MAJOR.MINOR.PATCH",
                input
            )));
        }

        let major = parse_component(input, "major", parts[0])?;
        let minor = parse_component(input, "minor", parts[1])?;
        let patch = parse_component(input, "patch", parts[2])?;

        Ok(Version {
            major,
            minor,
            patch,
        })
    }

    /// Bump version according to bump type
    ///
    /// Fails instead of wrapping when the incremented component would exceed `u64::MAX`.
    pub fn bump(&self, bump_type: VersionBump) -> Result<Self> {
        let overflow = || {
            ReleaseError::format(format!(
                "'{}' - {} component cannot be incremented further",
                self, bump_type
            ))
        };

        let bumped = match bump_type {
            VersionBump::Major => Version {
                major: self.major.checked_add(1).ok_or_else(overflow)?,
                minor: 0,
                patch: 0,
            },
            VersionBump::Minor => Version {
                major: self.major,
                minor: self.minor.checked_add(1).ok_or_else(overflow)?,
                patch: 0,
            },
            VersionBump::Patch => Version {
                major: self.major,
                minor: self.minor,
                patch: self.patch.checked_add(1).ok_or_else(overflow)?,
            },
        };
        Ok(bumped)
    }
}

fn parse_component(input: &str, name: &str, part: &str) -> Result<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ReleaseError::format(format!(
            "'{}' - {} component '{}' is not a non-negative integer",
            input, name, part
        )));
    }
    if part.len() > 1 && part.starts_with('0') {
        return Err(ReleaseError::format(format!(
            "'{}' - {} component '{}' has a leading zero",
            input, name, part
        )));
    }
    part.parse::<u64>().map_err(|_| {
        ReleaseError::format(format!(
            "'{}' - {} component '{}' is out of range",
            input, name, part
        ))
    })
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

impl FromStr for Version {
    type Err = ReleaseError;

    fn from_str(s: &str) -> Result<Self> {
        Version::parse(s)
    }
}

/// Which semantic version component to increment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VersionBump {
    Major,
    Minor,
    Patch,
}

impl VersionBump {
    pub fn as_str(&self) -> &'static str {
        match self {
            VersionBump::Major => "major",
            VersionBump::Minor => "minor",
            VersionBump::Patch => "patch",
        }
    }
}

impl fmt::Display for VersionBump {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parse `current` and return the next version for `bump_type`.
///
/// # Example
/// ```
/// use release_bump::domain::{bump_version, Version, VersionBump};
///
/// assert_eq!(bump_version("1.2.3", VersionBump::Minor).unwrap(), Version::new(1, 3, 0));
/// assert!(bump_version("1.2", VersionBump::Patch).is_err());
/// ```
pub fn bump_version(current: &str, bump_type: VersionBump) -> Result<Version> {
    Version::parse(current)?.bump(bump_type)
}
