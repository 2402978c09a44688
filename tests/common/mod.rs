//! Shared test utilities for integration tests.
//!
//! Not all functions are used by every test file.
#![allow(dead_code)]

use std::path::Path;

use git2::{Oid, Repository, RepositoryInitOptions, Signature};

/// A temporary git repository whose default branch is `main`.
pub struct TestRepo {
    pub dir: tempfile::TempDir,
    pub repo: Repository,
}

impl TestRepo {
    pub fn new() -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp directory");
        let mut opts = RepositoryInitOptions::new();
        opts.initial_head("main");
        let repo = Repository::init_opts(dir.path(), &opts).expect("Failed to init git repo");

        {
            let mut config = repo.config().expect("Could not get config");
            config
                .set_str("user.name", "Test User")
                .expect("Could not set user.name");
            config
                .set_str("user.email", "test@example.com")
                .expect("Could not set user.email");
        }

        TestRepo { dir, repo }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    fn signature(&self) -> Signature<'static> {
        Signature::now("Test User", "test@example.com").expect("Failed to create signature")
    }

    /// Commit on `main` (following HEAD). Returns the commit id.
    pub fn commit(&self, message: &str) -> Oid {
        let parent = self
            .repo
            .head()
            .ok()
            .and_then(|h| h.peel_to_commit().ok())
            .map(|c| c.id());
        let parents: Vec<Oid> = parent.into_iter().collect();
        self.commit_on("HEAD", message, &parents)
    }

    /// Commit with explicit parents, moving `update_ref` to the new commit.
    ///
    /// When `update_ref` exists its tip must be the first parent.
    pub fn commit_on(&self, update_ref: &str, message: &str, parents: &[Oid]) -> Oid {
        let blob = self
            .repo
            .blob(message.as_bytes())
            .expect("Failed to write blob");
        let mut builder = self.repo.treebuilder(None).expect("Failed to get treebuilder");
        builder
            .insert("file.txt", blob, 0o100644)
            .expect("Failed to insert blob");
        let tree_id = builder.write().expect("Failed to write tree");
        let tree = self.repo.find_tree(tree_id).expect("Failed to find tree");

        let parent_commits: Vec<git2::Commit> = parents
            .iter()
            .map(|p| self.repo.find_commit(*p).expect("Failed to find parent"))
            .collect();
        let parent_refs: Vec<&git2::Commit> = parent_commits.iter().collect();

        let sig = self.signature();
        self.repo
            .commit(Some(update_ref), &sig, &sig, message, &tree, &parent_refs)
            .expect("Failed to create commit")
    }

    /// Commit a series of messages on `main`, returning the last id.
    pub fn commits(&self, messages: &[&str]) -> Oid {
        let mut last = None;
        for message in messages {
            last = Some(self.commit(message));
        }
        last.expect("at least one message")
    }

    /// Create a branch at `target`.
    pub fn branch(&self, name: &str, target: Oid) {
        let commit = self.repo.find_commit(target).expect("Failed to find commit");
        self.repo
            .branch(name, &commit, false)
            .expect("Failed to create branch");
    }

    pub fn tag_lightweight(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).expect("Failed to find object");
        self.repo
            .tag_lightweight(name, &object, false)
            .expect("Failed to create tag");
    }

    pub fn tag_annotated(&self, name: &str, target: Oid) {
        let object = self.repo.find_object(target, None).expect("Failed to find object");
        self.repo
            .tag(name, &object, &self.signature(), name, false)
            .expect("Failed to create tag");
    }

    pub fn write_file(&self, name: &str, contents: &str) -> std::path::PathBuf {
        let path = self.dir.path().join(name);
        std::fs::write(&path, contents).expect("Failed to write file");
        path
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.repo
            .find_reference(&format!("refs/tags/{}", name))
            .is_ok()
    }
}
