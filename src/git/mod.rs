//! Git operations abstraction layer
//!
//! The engine only reads history through the [Repository] trait. The concrete
//! implementations are:
//!
//! - [repository::Git2Repository]: a real repository backed by the `git2` crate
//! - [mock::MockRepository]: an in-memory commit graph for tests
//!
//! # Usage
//!
//! ```rust
//! # use semver_release::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> semver_release::Result<()> {
//! let head = repo.resolve_reference("main")?;
//! let commit = repo.find_commit(head)?;
//! println!("{} has {} parent(s)", commit.summary(), commit.parents.len());
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{Commit, TagRef};
use crate::error::Result;
use git2::Oid;

/// Read-only access to a repository's commit graph
///
/// ## Error Handling
///
/// A reference that cannot be resolved is reported as
/// [crate::error::ReleaseError::ReferenceNotFound]; any other failure to read
/// the underlying storage is [crate::error::ReleaseError::Repository].
///
/// ## Concurrency
///
/// Implementations are not required to be `Sync`. Concurrent reads of one
/// repository are only safe if the implementation says so.
pub trait Repository {
    /// Resolve a branch name or revision to the commit it points at
    ///
    /// # Arguments
    /// * `reference` - A local branch name (e.g., "main") or any revision
    ///   the implementation understands
    fn resolve_reference(&self, reference: &str) -> Result<Oid>;

    /// All tags in the repository, with annotated tags peeled to their commit
    ///
    /// Tags that do not point at a commit are skipped.
    fn tag_references(&self) -> Result<Vec<TagRef>>;

    /// Read a single commit: message and parent ids
    fn find_commit(&self, id: Oid) -> Result<Commit>;

    /// Whether `ancestor` is reachable from `descendant` by following parents.
    ///
    /// A commit is reachable from itself.
    fn is_reachable(&self, ancestor: Oid, descendant: Oid) -> Result<bool>;
}
