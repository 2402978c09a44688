use git2::Oid;

use crate::domain::Version;

/// A named tag reference pointing at a commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    /// Commit the tag resolves to (annotated tags already peeled)
    pub target: Oid,
}

impl TagRef {
    /// Create a new tag reference
    pub fn new(name: impl Into<String>, target: Oid) -> Self {
        TagRef {
            name: name.into(),
            target,
        }
    }

    /// Classify this tag's name against a prefix
    pub fn recognize(&self, prefix: &str) -> TagName {
        TagName::classify(&self.name, prefix)
    }
}

/// How a tag name relates to the configured prefix
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagName {
    /// Prefix stripped, remainder is a stable version
    Release(Version),
    /// Carries the prefix and looks like a version, but is not a stable release
    Malformed { reason: String },
    /// Not a release tag for this prefix
    Unrelated,
}

impl TagName {
    /// Strip `prefix` from `name` when present and parse the remainder.
    ///
    /// A name without the prefix is parsed as-is, so `1.4.0` is a release
    /// for prefix `v` too. Only names that carried the prefix (or any name,
    /// for an empty prefix) are reported as malformed.
    pub fn classify(name: &str, prefix: &str) -> Self {
        let (rest, prefixed) = match name.strip_prefix(prefix) {
            Some(rest) => (rest, true),
            None => (name, false),
        };

        if let Some(version) = Version::parse(rest) {
            return TagName::Release(version);
        }

        if prefixed && rest.starts_with(|c: char| c.is_ascii_digit()) {
            let reason = if rest.contains('-') {
                "pre-release versions are not releases"
            } else {
                "not a MAJOR.MINOR.PATCH version"
            };
            TagName::Malformed {
                reason: reason.to_string(),
            }
        } else {
            TagName::Unrelated
        }
    }
}

/// Render the tag name for a version (e.g. prefix "v", 1.2.3 -> "v1.2.3")
pub fn format_tag_name(prefix: &str, version: &Version) -> String {
    format!("{}{}", prefix, version)
}
