use crate::domain::{Commit, TagRef};
use crate::error::{ReleaseError, Result};
use crate::signing::Signer;
use git2::{ErrorCode, ObjectType, Oid, Repository as Git2Repo, Signature};
use std::path::Path;
use tracing::debug;

const DEFAULT_TAGGER_NAME: &str = "semver-release";
const DEFAULT_TAGGER_EMAIL: &str = "semver-release@localhost";

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo }
    }

    /// Working directory, or the git directory for bare repositories
    pub fn root(&self) -> &Path {
        self.repo.workdir().unwrap_or_else(|| self.repo.path())
    }

    /// Create an annotated tag `name` on `target`.
    ///
    /// With a signer the tag object is assembled by hand, the detached
    /// signature appended to the message, and the object written directly
    /// to the object database.
    ///
    /// # Returns
    /// * `Ok(Oid)` - Id of the new tag object
    /// * `Err` - If the name is invalid or taken, the target is not a commit,
    ///   or signing fails
    pub fn create_release_tag(
        &self,
        name: &str,
        target: Oid,
        message: &str,
        signer: Option<&dyn Signer>,
    ) -> Result<Oid> {
        let reference_name = format!("refs/tags/{}", name);

        if !git2::Reference::is_valid_name(&reference_name) {
            return Err(ReleaseError::tag(format!("'{}' is not a valid tag name", name)));
        }

        match self.repo.find_reference(&reference_name) {
            Ok(_) => {
                return Err(ReleaseError::tag(format!("tag '{}' already exists", name)));
            }
            Err(e) if e.code() == ErrorCode::NotFound => {}
            Err(e) => return Err(e.into()),
        }

        let object = self
            .repo
            .find_object(target, Some(ObjectType::Commit))
            .map_err(|e| ReleaseError::tag(format!("cannot find commit {}: {}", target, e)))?;

        let tagger = self.tagger()?;

        let tag_oid = match signer {
            None => self
                .repo
                .tag(name, &object, &tagger, message, false)
                .map_err(|e| ReleaseError::tag(format!("cannot create tag '{}': {}", name, e)))?,
            Some(signer) => {
                let mut buffer = tag_object_buffer(name, target, &tagger, message);
                let signature = signer.sign(buffer.as_bytes())?;
                buffer.push_str(&signature);
                if !signature.ends_with('\n') {
                    buffer.push('\n');
                }

                let oid = self.repo.odb()?.write(ObjectType::Tag, buffer.as_bytes())?;
                self.repo
                    .reference(&reference_name, oid, false, "semver-release: signed tag")
                    .map_err(|e| {
                        ReleaseError::tag(format!("cannot create tag '{}': {}", name, e))
                    })?;
                oid
            }
        };

        debug!(tag = name, target = %target, signed = signer.is_some(), "created tag");
        Ok(tag_oid)
    }

    fn tagger(&self) -> Result<Signature<'static>> {
        match self.repo.signature() {
            Ok(signature) => Ok(signature.to_owned()),
            Err(e) if e.code() == ErrorCode::NotFound => {
                Ok(Signature::now(DEFAULT_TAGGER_NAME, DEFAULT_TAGGER_EMAIL)?)
            }
            Err(e) => Err(e.into()),
        }
    }
}

/// Raw tag object as git hashes it, before any signature is appended
fn tag_object_buffer(name: &str, target: Oid, tagger: &Signature<'_>, message: &str) -> String {
    let when = tagger.when();
    let offset = when.offset_minutes().abs();
    let mut buffer = format!(
        "object {}\ntype commit\ntag {}\ntagger {} <{}> {} {}{:02}{:02}\n\n{}",
        target,
        name,
        String::from_utf8_lossy(tagger.name_bytes()),
        String::from_utf8_lossy(tagger.email_bytes()),
        when.seconds(),
        when.sign(),
        offset / 60,
        offset % 60,
        message
    );
    if !buffer.ends_with('\n') {
        buffer.push('\n');
    }
    buffer
}

impl super::Repository for Git2Repository {
    fn resolve_reference(&self, reference: &str) -> Result<Oid> {
        match self.repo.find_branch(reference, git2::BranchType::Local) {
            Ok(branch) => return Ok(branch.into_reference().peel_to_commit()?.id()),
            Err(e) if e.code() == ErrorCode::NotFound => {}
            Err(e) if e.code() == ErrorCode::InvalidSpec => {}
            Err(e) => return Err(e.into()),
        }

        match self.repo.revparse_single(reference) {
            Ok(object) => Ok(object.peel_to_commit()?.id()),
            Err(e)
                if matches!(
                    e.code(),
                    ErrorCode::NotFound | ErrorCode::InvalidSpec | ErrorCode::UnbornBranch
                ) =>
            {
                Err(ReleaseError::reference_not_found(format!(
                    "'{}' does not name a commit",
                    reference
                )))
            }
            Err(e) => Err(e.into()),
        }
    }

    fn tag_references(&self) -> Result<Vec<TagRef>> {
        let mut tags = Vec::new();

        for reference in self.repo.references_glob("refs/tags/*")? {
            let reference = reference?;
            let Some(name) = reference.shorthand() else {
                debug!("skipping tag with a non UTF-8 name");
                continue;
            };
            let name = name.to_string();

            match reference.peel_to_commit() {
                Ok(commit) => tags.push(TagRef::new(name, commit.id())),
                Err(e) if matches!(e.code(), ErrorCode::Peel | ErrorCode::InvalidSpec) => {
                    debug!(tag = %name, error = %e, "skipping tag that is not a commit")
                }
                Err(e) => return Err(e.into()),
            }
        }

        tags.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(tags)
    }

    fn find_commit(&self, id: Oid) -> Result<Commit> {
        let commit = self.repo.find_commit(id)?;

        Ok(Commit::new(
            id,
            String::from_utf8_lossy(commit.message_bytes()),
            commit.parent_ids().collect(),
        ))
    }

    fn is_reachable(&self, ancestor: Oid, descendant: Oid) -> Result<bool> {
        if ancestor == descendant {
            return Ok(true);
        }
        Ok(self.repo.graph_descendant_of(descendant, ancestor)?)
    }
}
