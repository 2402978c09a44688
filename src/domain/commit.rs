use std::sync::LazyLock;

use git2::Oid;
use regex::Regex;

use crate::domain::Precedence;

static HEADER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>[A-Za-z][A-Za-z0-9_-]*)(?:\((?P<scope>[^()\r\n]+)\))?(?P<breaking>!)?:[ \t]+(?P<description>\S.*?)\s*$",
    )
    .expect("conventional commit header pattern is valid")
});

const BREAKING_FOOTERS: [&str; 2] = ["BREAKING CHANGE:", "BREAKING-CHANGE:"];

/// A commit read from repository history
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Commit {
    pub id: Oid,
    pub message: String,
    /// Empty for a root commit, two or more for a merge
    pub parents: Vec<Oid>,
}

impl Commit {
    pub fn new(id: Oid, message: impl Into<String>, parents: Vec<Oid>) -> Self {
        Commit {
            id,
            message: message.into(),
            parents,
        }
    }

    /// First line of the message
    pub fn summary(&self) -> &str {
        self.message.lines().next().unwrap_or_default()
    }

    pub fn is_merge(&self) -> bool {
        self.parents.len() > 1
    }
}

/// Parsed representation of a conventional commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConventionalCommit {
    pub r#type: String,
    pub scope: Option<String>,
    pub description: String,
    pub body: Option<String>,
    pub is_breaking_change: bool,
}

impl ConventionalCommit {
    /// Parse a commit message of the form `type(scope)!: description`.
    ///
    /// Returns `None` when the header does not follow the grammar. A `!`
    /// before the colon or a `BREAKING CHANGE:` footer line (any case)
    /// marks the commit as breaking.
    pub fn parse(message: &str) -> Option<Self> {
        let message = message.trim_start();
        let (header, rest) = match message.split_once('\n') {
            Some((header, rest)) => (header, Some(rest)),
            None => (message, None),
        };

        let captures = HEADER.captures(header.trim_end_matches('\r'))?;

        let body = rest
            .map(str::trim)
            .filter(|body| !body.is_empty())
            .map(str::to_string);

        let has_footer = body
            .as_deref()
            .map(|body| body.lines().any(is_breaking_footer))
            .unwrap_or(false);

        Some(ConventionalCommit {
            r#type: captures["type"].to_string(),
            scope: captures.name("scope").map(|m| m.as_str().to_string()),
            description: captures["description"].to_string(),
            body,
            is_breaking_change: captures.name("breaking").is_some() || has_footer,
        })
    }
}

fn is_breaking_footer(line: &str) -> bool {
    let line = line.trim_end();
    BREAKING_FOOTERS.iter().any(|footer| {
        line.get(..footer.len())
            .is_some_and(|start| start.eq_ignore_ascii_case(footer))
    })
}

/// A commit together with the precedence derived from its message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedCommit {
    pub commit: Commit,
    /// `None` when the message is not a conventional commit
    pub parsed: Option<ConventionalCommit>,
    pub precedence: Precedence,
}
