use crate::error::{PushError, Result};
use semver::Version;
use std::cmp::Ordering;
use std::fmt;

/// A release tag of the form `v<major>.<minor>.<patch>`
///
/// Ordering is version-aware: `v1.10.0` sorts after `v1.9.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag {
    version: Version,
}

impl VersionTag {
    /// Create a tag from a parsed version
    pub fn new(version: Version) -> Self {
        VersionTag { version }
    }

    /// Parse a tag name such as "v1.2.3" (a bare or upper-case "V" prefix is accepted)
    pub fn parse(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        let clean = trimmed
            .strip_prefix('v')
            .or_else(|| trimmed.strip_prefix('V'))
            .unwrap_or(trimmed);

        let version = Version::parse(clean)
            .map_err(|e| PushError::version(format!("Invalid tag '{}': {}", name, e)))?;

        Ok(VersionTag { version })
    }

    pub fn version(&self) -> &Version {
        &self.version
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.version)
    }
}

impl Ord for VersionTag {
    fn cmp(&self, other: &Self) -> Ordering {
        self.version.cmp(&other.version)
    }
}

impl PartialOrd for VersionTag {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Result of scanning a module's tag list for the latest release
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TagScan {
    /// Greatest tag under version-aware ordering, if any tag parsed
    pub latest: Option<VersionTag>,
    /// Tag names that are not release tags and were left out of the comparison
    pub ignored: Vec<String>,
}

/// Select the latest release tag from raw tag names.
///
/// Names that do not parse as `v<semver>` are collected in [`TagScan::ignored`].
pub fn latest_tag<S: AsRef<str>>(names: &[S]) -> TagScan {
    let mut scan = TagScan::default();

    for name in names {
        let name = name.as_ref();
        match VersionTag::parse(name) {
            Ok(tag) => {
                if scan.latest.as_ref().map_or(true, |latest| tag > *latest) {
                    scan.latest = Some(tag);
                }
            }
            Err(_) => scan.ignored.push(name.to_string()),
        }
    }

    scan
}
