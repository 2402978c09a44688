use crate::domain::{ClassifiedCommit, Precedence, Version};
use crate::error::{ReleaseError, Result};

/// Outcome of applying commit precedence to the last version
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextVersion {
    pub version: Version,
    pub is_release: bool,
    /// Highest precedence among the commits considered
    pub precedence: Precedence,
}

/// Highest precedence present, `None` for an empty slice
pub fn highest_precedence(commits: &[ClassifiedCommit]) -> Precedence {
    let mut highest = Precedence::None;
    for commit in commits {
        if commit.precedence > highest {
            highest = commit.precedence;
            if highest == Precedence::Major {
                break;
            }
        }
    }
    highest
}

/// Compute the version that follows `last_version` given the new commits.
///
/// Without a prior release the bump is applied to `0.0.0`, so a first
/// feature yields `0.1.0`, a first breaking change `1.0.0` and a first fix
/// `0.0.1`. When no commit warrants a release the last version (or `0.0.0`)
/// is returned unchanged with `is_release == false`.
///
/// Fails with a configuration error when the bumped component would
/// overflow.
pub fn next_version(
    last_version: Option<Version>,
    commits: &[ClassifiedCommit],
) -> Result<NextVersion> {
    let base = last_version.unwrap_or(Version::ZERO);
    let precedence = highest_precedence(commits);

    let version = base.bump(precedence).ok_or_else(|| {
        ReleaseError::configuration(format!(
            "version {} cannot take a {} bump without overflowing",
            base, precedence
        ))
    })?;

    Ok(NextVersion {
        version,
        is_release: precedence.is_release(),
        precedence,
    })
}
