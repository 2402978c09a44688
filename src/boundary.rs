use std::fmt;

/// Non-fatal observations made while walking history.
/// These never abort a computation but should be reported to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryWarning {
    /// The branch head is the commit of the latest release tag
    NoNewCommits {
        latest_tag: String,
        current_commit_hash: String,
    },
    /// Tag carries the prefix but is not a stable release version
    IgnoredTag { tag: String, reason: String },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::NoNewCommits {
                latest_tag,
                current_commit_hash,
            } => {
                let short_hash = current_commit_hash
                    .get(..7)
                    .unwrap_or(current_commit_hash.as_str());
                write!(
                    f,
                    "No new commits since tag '{}' (current: {})",
                    latest_tag, short_hash
                )
            }
            BoundaryWarning::IgnoredTag { tag, reason } => {
                write!(f, "Ignoring tag '{}': {}", tag, reason)
            }
        }
    }
}
