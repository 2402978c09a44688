use crate::domain::{Commit, TagRef};
use crate::error::{ReleaseError, Result};
use crate::git::Repository;
use git2::Oid;
use std::cell::RefCell;
use std::collections::{BTreeMap, HashMap, HashSet};

/// In-memory commit graph for testing without an actual git repository
///
/// Commit ids are generated sequentially, so histories built the same way
/// always get the same ids.
#[derive(Default)]
pub struct MockRepository {
    commits: HashMap<Oid, Commit>,
    tags: BTreeMap<String, Oid>,
    branch_heads: HashMap<String, Oid>,
    unreadable: HashSet<Oid>,
    reads: RefCell<HashMap<Oid, usize>>,
    next_id: u32,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a commit with the given parents and return its id
    pub fn add_commit(&mut self, message: impl Into<String>, parents: &[Oid]) -> Oid {
        self.next_id += 1;
        let mut bytes = [0u8; 20];
        bytes[16..].copy_from_slice(&self.next_id.to_be_bytes());
        let id = Oid::from_bytes(&bytes).unwrap_or_else(|_| Oid::zero());

        self.commits
            .insert(id, Commit::new(id, message, parents.to_vec()));
        id
    }

    /// Add a chain of commits on top of `parent`, returning the last one
    pub fn add_chain(&mut self, parent: Option<Oid>, messages: &[&str]) -> Option<Oid> {
        let mut tip = parent;
        for message in messages {
            let parents: Vec<Oid> = tip.into_iter().collect();
            tip = Some(self.add_commit(*message, &parents));
        }
        tip
    }

    /// Add a tag pointing to a commit
    pub fn add_tag(&mut self, name: impl Into<String>, oid: Oid) {
        self.tags.insert(name.into(), oid);
    }

    /// Set a branch head
    pub fn set_branch_head(&mut self, branch: impl Into<String>, oid: Oid) {
        self.branch_heads.insert(branch.into(), oid);
    }

    /// Make reading `oid` fail as if the object were corrupt
    pub fn set_unreadable(&mut self, oid: Oid) {
        self.unreadable.insert(oid);
    }

    /// How many times `find_commit` was called for `oid`
    pub fn reads(&self, oid: Oid) -> usize {
        self.reads.borrow().get(&oid).copied().unwrap_or(0)
    }
}

impl Repository for MockRepository {
    fn resolve_reference(&self, reference: &str) -> Result<Oid> {
        self.branch_heads
            .get(reference)
            .copied()
            .ok_or_else(|| ReleaseError::reference_not_found(format!("'{}'", reference)))
    }

    fn tag_references(&self) -> Result<Vec<TagRef>> {
        Ok(self
            .tags
            .iter()
            .map(|(name, oid)| TagRef::new(name.clone(), *oid))
            .collect())
    }

    fn find_commit(&self, id: Oid) -> Result<Commit> {
        *self.reads.borrow_mut().entry(id).or_insert(0) += 1;

        if self.unreadable.contains(&id) {
            return Err(git2::Error::from_str(&format!("object {} is corrupt", id)).into());
        }

        self.commits
            .get(&id)
            .cloned()
            .ok_or_else(|| git2::Error::from_str(&format!("object {} not found", id)).into())
    }

    fn is_reachable(&self, ancestor: Oid, descendant: Oid) -> Result<bool> {
        let mut seen = HashSet::new();
        let mut pending = vec![descendant];

        while let Some(id) = pending.pop() {
            if id == ancestor {
                return Ok(true);
            }
            if !seen.insert(id) {
                continue;
            }
            if let Some(commit) = self.commits.get(&id) {
                pending.extend(commit.parents.iter().copied());
            }
        }

        Ok(false)
    }
}
