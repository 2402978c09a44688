use crate::domain::{ClassifiedCommit, Commit, ConventionalCommit, Precedence, RuleSet};
use tracing::debug;

/// Assigns release precedence to commits using a rule set
pub struct CommitClassifier<'a> {
    rules: &'a RuleSet,
}

impl<'a> CommitClassifier<'a> {
    pub fn new(rules: &'a RuleSet) -> Self {
        CommitClassifier { rules }
    }

    /// Precedence of a single commit message.
    ///
    /// Breaking changes are always `Major`. Messages that are not
    /// conventional commits, or whose type has no rule, are `None`.
    pub fn precedence(&self, message: &str) -> Precedence {
        match ConventionalCommit::parse(message) {
            Some(parsed) => self.precedence_of(&parsed),
            None => Precedence::None,
        }
    }

    fn precedence_of(&self, parsed: &ConventionalCommit) -> Precedence {
        if parsed.is_breaking_change {
            Precedence::Major
        } else {
            self.rules.resolve(&parsed.r#type)
        }
    }

    /// Classify one commit
    pub fn classify(&self, commit: Commit) -> ClassifiedCommit {
        let parsed = ConventionalCommit::parse(&commit.message);
        let precedence = parsed
            .as_ref()
            .map(|parsed| self.precedence_of(parsed))
            .unwrap_or(Precedence::None);

        debug!(
            commit = %commit.id,
            summary = commit.summary(),
            precedence = %precedence,
            "classified commit"
        );

        ClassifiedCommit {
            commit,
            parsed,
            precedence,
        }
    }

    /// Classify every commit, keeping order
    pub fn classify_all(&self, commits: Vec<Commit>) -> Vec<ClassifiedCommit> {
        commits.into_iter().map(|c| self.classify(c)).collect()
    }
}
