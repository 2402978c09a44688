//! Version computation pipeline: walk history, classify, reduce.

use git2::Oid;
use tracing::debug;

use crate::analyzer::{next_version, CommitClassifier, HistoryWalker, LastRelease};
use crate::boundary::BoundaryWarning;
use crate::domain::{format_tag_name, Precedence, RuleSet, Version};
use crate::error::{Result, Stage};
use crate::git::Repository;

/// Result of one version computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseDecision {
    /// Next version when `is_release`, otherwise the current one
    pub version: Version,
    pub is_release: bool,
    pub precedence: Precedence,
    pub previous: Option<LastRelease>,
    pub head: Oid,
    pub commits_analyzed: usize,
    pub warnings: Vec<BoundaryWarning>,
}

impl ReleaseDecision {
    /// Tag name for the decided version
    pub fn tag_name(&self, prefix: &str) -> String {
        format_tag_name(prefix, &self.version)
    }
}

/// Computes release decisions for branches of a repository
#[derive(Debug, Clone)]
pub struct Engine {
    rules: RuleSet,
    tag_prefix: String,
}

impl Engine {
    pub fn new(rules: RuleSet, tag_prefix: impl Into<String>) -> Self {
        Engine {
            rules,
            tag_prefix: tag_prefix.into(),
        }
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn tag_prefix(&self) -> &str {
        &self.tag_prefix
    }

    /// Decide whether `branch` needs a release and which version it gets.
    ///
    /// Failures carry the stage they came from; no partial decision is
    /// returned.
    pub fn compute_next_version<R: Repository + ?Sized>(
        &self,
        repo: &R,
        branch: &str,
    ) -> Result<ReleaseDecision> {
        let history = HistoryWalker::new(repo, &self.tag_prefix)
            .find_unreleased_commits(branch)
            .map_err(|e| e.in_stage(Stage::WalkHistory))?;

        let commits_analyzed = history.commits.len();
        let classified = CommitClassifier::new(&self.rules).classify_all(history.commits);

        let last_version = history.last_release.as_ref().map(|r| r.version);
        let next =
            next_version(last_version, &classified).map_err(|e| e.in_stage(Stage::Calculate))?;

        debug!(
            branch,
            commits = commits_analyzed,
            precedence = %next.precedence,
            version = %next.version,
            release = next.is_release,
            "computed next version"
        );

        Ok(ReleaseDecision {
            version: next.version,
            is_release: next.is_release,
            precedence: next.precedence,
            previous: history.last_release,
            head: history.head,
            commits_analyzed,
            warnings: history.warnings,
        })
    }
}

/// One-shot form of [`Engine::compute_next_version`]
pub fn compute_next_version<R: Repository + ?Sized>(
    repo: &R,
    branch: &str,
    rules: RuleSet,
    tag_prefix: &str,
) -> Result<ReleaseDecision> {
    Engine::new(rules, tag_prefix).compute_next_version(repo, branch)
}
