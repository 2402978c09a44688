use std::fmt;
use std::str::FromStr;

use crate::error::ReleaseError;

/// Release precedence of a commit, ordered `None < Patch < Minor < Major`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Precedence {
    #[default]
    None,
    Patch,
    Minor,
    Major,
}

impl Precedence {
    /// Level names accepted in rule configuration
    pub const LEVEL_NAMES: [&'static str; 3] = ["major", "minor", "patch"];

    /// Whether this level warrants a release
    pub fn is_release(self) -> bool {
        self != Precedence::None
    }
}

impl FromStr for Precedence {
    type Err = ReleaseError;

    /// Parse a rule-configuration level name. `none` is not a configurable level.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "major" => Ok(Precedence::Major),
            "minor" => Ok(Precedence::Minor),
            "patch" => Ok(Precedence::Patch),
            other => Err(ReleaseError::configuration(format!(
                "unknown release level '{}', expected one of {}",
                other,
                Self::LEVEL_NAMES.join(", ")
            ))),
        }
    }
}

impl fmt::Display for Precedence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Precedence::None => "none",
            Precedence::Patch => "patch",
            Precedence::Minor => "minor",
            Precedence::Major => "major",
        };
        f.write_str(name)
    }
}
