use crate::domain::Precedence;
use std::fmt;

/// Semantic version representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

impl Version {
    /// The version a repository without any release starts from
    pub const ZERO: Version = Version::new(0, 0, 0);

    /// Create a new version
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        Version {
            major,
            minor,
            patch,
        }
    }

    /// Parse a stable `X.Y.Z` version.
    ///
    /// Build metadata (`1.2.3+build.4`) is accepted and dropped; pre-release
    /// versions are not releases and yield `None`.
    pub fn parse(text: &str) -> Option<Self> {
        let parsed = semver::Version::parse(text).ok()?;
        if !parsed.pre.is_empty() {
            return None;
        }
        Some(Version::new(parsed.major, parsed.minor, parsed.patch))
    }

    /// Bump version according to precedence, resetting lower components.
    ///
    /// Returns `None` when the bumped component would overflow.
    pub fn bump(&self, precedence: Precedence) -> Option<Self> {
        let bumped = match precedence {
            Precedence::Major => Version::new(self.major.checked_add(1)?, 0, 0),
            Precedence::Minor => Version::new(self.major, self.minor.checked_add(1)?, 0),
            Precedence::Patch => {
                Version::new(self.major, self.minor, self.patch.checked_add(1)?)
            }
            Precedence::None => *self,
        };
        Some(bumped)
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version_parse() {
        let v = Version::parse("1.2.3").unwrap();
        assert_eq!(v.major, 1);
        assert_eq!(v.minor, 2);
        assert_eq!(v.patch, 3);
    }

    #[test]
    fn test_version_parse_build_metadata() {
        assert_eq!(Version::parse("1.2.3+build.7"), Some(Version::new(1, 2, 3)));
    }

    #[test]
    fn test_version_parse_prerelease_is_not_a_release() {
        assert_eq!(Version::parse("2.0.0-rc.1"), None);
    }

    #[test]
    fn test_version_parse_invalid() {
        assert!(Version::parse("1.2").is_none());
        assert!(Version::parse("1.2.3.4").is_none());
        assert!(Version::parse("v1.2.3").is_none());
        assert!(Version::parse("01.2.3").is_none());
        assert!(Version::parse("-1.2.3").is_none());
    }

    #[test]
    fn test_version_bump_major() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.bump(Precedence::Major), Some(Version::new(2, 0, 0)));
    }

    #[test]
    fn test_version_bump_minor() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.bump(Precedence::Minor), Some(Version::new(1, 3, 0)));
    }

    #[test]
    fn test_version_bump_patch() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.bump(Precedence::Patch), Some(Version::new(1, 2, 4)));
    }

    #[test]
    fn test_version_bump_none_is_identity() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.bump(Precedence::None), Some(v));
    }

    #[test]
    fn test_version_bump_overflow() {
        let v = Version::parse("18446744073709551615.0.0").unwrap();
        assert_eq!(v.bump(Precedence::Major), None);
        assert_eq!(v.bump(Precedence::Minor), Some(Version::new(u64::MAX, 1, 0)));
        assert_eq!(Version::new(0, 0, u64::MAX).bump(Precedence::Patch), None);
        let top = Version::new(0, u64::MAX, 0);
        assert_eq!(top.bump(Precedence::None), Some(top));
    }

    #[test]
    fn test_version_ordering_is_lexicographic() {
        assert!(Version::new(1, 10, 0) > Version::new(1, 9, 99));
        assert!(Version::new(2, 0, 0) > Version::new(1, 99, 99));
        assert!(Version::new(0, 0, 2) > Version::new(0, 0, 1));
    }

    #[test]
    fn test_version_display() {
        let v = Version::new(1, 2, 3);
        assert_eq!(v.to_string(), "1.2.3");
    }
}
