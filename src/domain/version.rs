use crate::error::{PushError, Result};
use semver::{BuildMetadata, Prerelease, Version};
use std::fmt;

/// Which version component is increased when a module is tagged
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IncrementPolicy {
    Major,
    Minor,
    Patch,
}

impl IncrementPolicy {
    /// Resolve the policy from the three independent flags of the configuration.
    ///
    /// Exactly one flag must be set; zero or several is a configuration error.
    pub fn from_flags(major: bool, minor: bool, patch: bool) -> Result<Self> {
        match (major, minor, patch) {
            (true, false, false) => Ok(IncrementPolicy::Major),
            (false, true, false) => Ok(IncrementPolicy::Minor),
            (false, false, true) => Ok(IncrementPolicy::Patch),
            (false, false, false) => Err(PushError::config("Not choose increase method.")),
            _ => Err(PushError::config(
                "Exactly one of version.major, version.minor and version.patch may be enabled",
            )),
        }
    }

    /// Next increase of `version` along this policy.
    ///
    /// Lower components restart at zero and pre-release or build metadata is
    /// dropped, so the result is always strictly greater than the input.
    /// Fails when the bumped component is already `u64::MAX`.
    pub fn apply(&self, version: &Version) -> Result<Version> {
        let bump = |component: u64| {
            component.checked_add(1).ok_or_else(|| {
                PushError::version(format!(
                    "cannot increase the {} component of {}",
                    self, version
                ))
            })
        };

        let (major, minor, patch) = match self {
            IncrementPolicy::Major => (bump(version.major)?, 0, 0),
            IncrementPolicy::Minor => (version.major, bump(version.minor)?, 0),
            IncrementPolicy::Patch => (version.major, version.minor, bump(version.patch)?),
        };

        Ok(Version {
            major,
            minor,
            patch,
            pre: Prerelease::EMPTY,
            build: BuildMetadata::EMPTY,
        })
    }
}

impl fmt::Display for IncrementPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IncrementPolicy::Major => write!(f, "major"),
            IncrementPolicy::Minor => write!(f, "minor"),
            IncrementPolicy::Patch => write!(f, "patch"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(s: &str) -> Version {
        Version::parse(s).unwrap()
    }

    #[test]
    fn test_single_flag_resolves() {
        assert_eq!(
            IncrementPolicy::from_flags(true, false, false).unwrap(),
            IncrementPolicy::Major
        );
        assert_eq!(
            IncrementPolicy::from_flags(false, true, false).unwrap(),
            IncrementPolicy::Minor
        );
        assert_eq!(
            IncrementPolicy::from_flags(false, false, true).unwrap(),
            IncrementPolicy::Patch
        );
    }

    #[test]
    fn test_no_flag_is_config_error() {
        let err = IncrementPolicy::from_flags(false, false, false).unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("Not choose increase method"));
    }

    #[test]
    fn test_several_flags_are_config_error() {
        assert!(IncrementPolicy::from_flags(true, true, false).is_err());
        assert!(IncrementPolicy::from_flags(true, false, true).is_err());
        assert!(IncrementPolicy::from_flags(false, true, true).is_err());
        assert!(IncrementPolicy::from_flags(true, true, true).is_err());
    }

    #[test]
    fn test_apply_patch() {
        assert_eq!(IncrementPolicy::Patch.apply(&v("1.4.2")).unwrap(), v("1.4.3"));
    }

    #[test]
    fn test_apply_minor_resets_patch() {
        assert_eq!(IncrementPolicy::Minor.apply(&v("1.4.2")).unwrap(), v("1.5.0"));
    }

    #[test]
    fn test_apply_major_resets_lower_components() {
        assert_eq!(IncrementPolicy::Major.apply(&v("1.4.2")).unwrap(), v("2.0.0"));
    }

    #[test]
    fn test_apply_drops_prerelease() {
        let next = IncrementPolicy::Patch
            .apply(&v("1.0.0-beta.2+build.7"))
            .unwrap();
        assert_eq!(next, v("1.0.1"));
        assert!(next.pre.is_empty());
        assert!(next.build.is_empty());
    }

    #[test]
    fn test_apply_is_strictly_greater() {
        for policy in [
            IncrementPolicy::Major,
            IncrementPolicy::Minor,
            IncrementPolicy::Patch,
        ] {
            let current = v("3.9.12");
            assert!(policy.apply(&current).unwrap() > current, "{} bump", policy);
        }
    }

    #[test]
    fn test_apply_at_component_limit_is_version_error() {
        let max = u64::MAX;
        let cases = [
            (IncrementPolicy::Major, Version::new(max, 0, 0)),
            (IncrementPolicy::Minor, Version::new(1, max, 0)),
            (IncrementPolicy::Patch, Version::new(1, 2, max)),
        ];

        for (policy, version) in cases {
            let err = policy.apply(&version).unwrap_err();
            assert!(matches!(err, PushError::Version(_)), "{} bump", policy);
        }
    }

    #[test]
    fn test_apply_limit_only_on_bumped_component() {
        let version = Version::new(1, u64::MAX, u64::MAX);
        assert_eq!(
            IncrementPolicy::Major.apply(&version).unwrap(),
            v("2.0.0")
        );
    }
}
