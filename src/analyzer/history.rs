use std::collections::{HashSet, VecDeque};

use git2::Oid;
use tracing::debug;

use crate::boundary::BoundaryWarning;
use crate::domain::{Commit, TagName, TagRef, Version};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;

/// The most recent release tag reachable from the branch head
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastRelease {
    pub tag: String,
    pub version: Version,
    pub commit: Oid,
}

/// Commits on a branch that no release tag covers yet
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnreleasedHistory {
    pub head: Oid,
    /// `None` when the branch has never been released
    pub last_release: Option<LastRelease>,
    /// Reachable from `head` but not from the last release, in discovery order
    pub commits: Vec<Commit>,
    pub warnings: Vec<BoundaryWarning>,
}

/// Walks a branch back to its latest release tag
pub struct HistoryWalker<'a, R: Repository + ?Sized> {
    repo: &'a R,
    tag_prefix: &'a str,
}

impl<'a, R: Repository + ?Sized> HistoryWalker<'a, R> {
    pub fn new(repo: &'a R, tag_prefix: &'a str) -> Self {
        HistoryWalker { repo, tag_prefix }
    }

    /// Collect the commits of `branch` made since its latest release.
    ///
    /// # Returns
    /// * `Ok(UnreleasedHistory)` - Head, last release and unreleased commits
    /// * `Err(ReferenceNotFound)` - If `branch` does not resolve to a commit
    /// * `Err(Configuration)` - If two different commits carry the highest version
    /// * `Err(Repository)` - If reading history fails
    pub fn find_unreleased_commits(&self, branch: &str) -> Result<UnreleasedHistory> {
        let head = self.repo.resolve_reference(branch)?;
        let mut warnings = Vec::new();

        let last_release = self.latest_release(head, &mut warnings)?;

        let hidden = match &last_release {
            Some(release) => self.ancestors(release.commit)?,
            None => HashSet::new(),
        };

        let commits = self.walk(head, &hidden)?;

        if let Some(release) = &last_release {
            if commits.is_empty() {
                warnings.push(BoundaryWarning::NoNewCommits {
                    latest_tag: release.tag.clone(),
                    current_commit_hash: head.to_string(),
                });
            }
        }

        debug!(
            branch,
            head = %head,
            last_release = last_release.as_ref().map(|r| r.tag.as_str()),
            unreleased = commits.len(),
            "walked history"
        );

        Ok(UnreleasedHistory {
            head,
            last_release,
            commits,
            warnings,
        })
    }

    /// Highest recognized version among tags reachable from `head`
    fn latest_release(
        &self,
        head: Oid,
        warnings: &mut Vec<BoundaryWarning>,
    ) -> Result<Option<LastRelease>> {
        let mut candidates: Vec<(Version, TagRef)> = Vec::new();

        for tag in self.repo.tag_references()? {
            match tag.recognize(self.tag_prefix) {
                TagName::Release(version) => candidates.push((version, tag)),
                TagName::Malformed { reason } => {
                    debug!(tag = %tag.name, %reason, "ignoring tag");
                    warnings.push(BoundaryWarning::IgnoredTag {
                        tag: tag.name,
                        reason,
                    });
                }
                TagName::Unrelated => {}
            }
        }

        // Highest version first; equal versions by name so the pick is stable
        candidates.sort_by(|(va, ta), (vb, tb)| vb.cmp(va).then_with(|| ta.name.cmp(&tb.name)));

        let mut selected: Option<LastRelease> = None;

        for (version, tag) in candidates {
            if let Some(chosen) = &selected {
                if version < chosen.version {
                    break;
                }
                if tag.target != chosen.commit && self.repo.is_reachable(tag.target, head)? {
                    return Err(ReleaseError::configuration(format!(
                        "tags '{}' and '{}' both mark version {} on different commits",
                        chosen.tag, tag.name, version
                    )));
                }
                continue;
            }

            if self.repo.is_reachable(tag.target, head)? {
                debug!(tag = %tag.name, %version, "selected latest release tag");
                selected = Some(LastRelease {
                    tag: tag.name,
                    version,
                    commit: tag.target,
                });
            } else {
                debug!(tag = %tag.name, "tag is not reachable from branch head");
            }
        }

        Ok(selected)
    }

    /// Every commit reachable from `start`, including `start`
    fn ancestors(&self, start: Oid) -> Result<HashSet<Oid>> {
        let mut seen = HashSet::new();
        let mut pending = vec![start];

        while let Some(id) = pending.pop() {
            if !seen.insert(id) {
                continue;
            }
            let commit = self.repo.find_commit(id)?;
            pending.extend(commit.parents.iter().filter(|p| !seen.contains(*p)));
        }

        Ok(seen)
    }

    /// Breadth-first walk from `head`, never entering `hidden` or revisiting a commit
    fn walk(&self, head: Oid, hidden: &HashSet<Oid>) -> Result<Vec<Commit>> {
        let mut commits = Vec::new();
        let mut queued: HashSet<Oid> = HashSet::new();
        let mut queue = VecDeque::new();

        if !hidden.contains(&head) {
            queued.insert(head);
            queue.push_back(head);
        }

        while let Some(id) = queue.pop_front() {
            let commit = self.repo.find_commit(id)?;

            for parent in &commit.parents {
                if !hidden.contains(parent) && queued.insert(*parent) {
                    queue.push_back(*parent);
                }
            }

            commits.push(commit);
        }

        Ok(commits)
    }
}

/// Convenience wrapper around [`HistoryWalker::find_unreleased_commits`]
pub fn find_unreleased_commits<R: Repository + ?Sized>(
    repo: &R,
    branch: &str,
    tag_prefix: &str,
) -> Result<UnreleasedHistory> {
    HistoryWalker::new(repo, tag_prefix).find_unreleased_commits(branch)
}
