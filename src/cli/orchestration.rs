//! Main workflow orchestration logic
//!
//! Runs the `local` command: open the repository, load rules, compute the
//! decision, export it to CI and create the release tag. Kept apart from
//! argument parsing so it can be driven programmatically.

use std::path::PathBuf;

use git2::Oid;
use tracing::info;

use crate::ci::GithubOutput;
use crate::config::load_rule_set;
use crate::engine::{Engine, ReleaseDecision};
use crate::error::{Result, Stage};
use crate::git::Git2Repository;
use crate::signing::{GpgSigner, Signer};

/// Branch released when none is given
pub const DEFAULT_RELEASE_BRANCH: &str = "main";

/// Options for the `local` workflow
///
/// Mirrors the CLI arguments without depending on clap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocalOptions {
    /// Path to the repository (or any directory inside it)
    pub repository: PathBuf,

    /// Rules file; discovered in the repository when absent
    pub rules_path: Option<PathBuf>,

    /// Prepended to versions in tag names
    pub tag_prefix: String,

    /// Branch whose history is analyzed
    pub release_branch: String,

    /// Armored private key used to sign the tag
    pub gpg_key_path: Option<PathBuf>,

    /// Compute and report only, never create a tag
    pub dry_run: bool,

    /// File receiving CI key/value output
    pub ci_output: Option<PathBuf>,
}

impl LocalOptions {
    pub fn new(repository: impl Into<PathBuf>) -> Self {
        LocalOptions {
            repository: repository.into(),
            rules_path: None,
            tag_prefix: String::new(),
            release_branch: DEFAULT_RELEASE_BRANCH.to_string(),
            gpg_key_path: None,
            dry_run: false,
            ci_output: None,
        }
    }
}

/// What the workflow did with the decision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    NoRelease,
    DryRun,
    Tagged { tag_oid: Oid },
}

/// Result of a successful `local` workflow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkflowResult {
    pub decision: ReleaseDecision,
    /// Prefixed version, e.g. "v1.2.3"
    pub tag: String,
    pub outcome: Outcome,
}

/// Run the `local` workflow, signing with `gpg_key_path` when given
pub fn run_local(options: &LocalOptions) -> Result<WorkflowResult> {
    let signer = match &options.gpg_key_path {
        Some(path) => {
            Some(GpgSigner::from_armored_key(path).map_err(|e| e.in_stage(Stage::CreateTag))?)
        }
        None => None,
    };

    run_local_with_signer(options, signer.as_ref().map(|s| s as &dyn Signer))
}

/// Run the `local` workflow with an already constructed signer
///
/// # Returns
///
/// The decision, the rendered tag name and what was done about it
pub fn run_local_with_signer(
    options: &LocalOptions,
    signer: Option<&dyn Signer>,
) -> Result<WorkflowResult> {
    let repo = Git2Repository::open(&options.repository)
        .map_err(|e| e.in_stage(Stage::OpenRepository))?;

    let rules = load_rule_set(options.rules_path.as_deref(), repo.root())
        .map_err(|e| e.in_stage(Stage::LoadRules))?;

    let engine = Engine::new(rules, options.tag_prefix.as_str());
    let decision = engine.compute_next_version(&repo, &options.release_branch)?;
    let tag = decision.tag_name(&options.tag_prefix);

    if let Some(path) = &options.ci_output {
        GithubOutput::append_to(path)
            .and_then(|mut output| output.write_decision(&options.tag_prefix, &decision))
            .map_err(|e| e.in_stage(Stage::CiOutput))?;
    }

    let outcome = if !decision.is_release {
        info!(current_version = %tag, new_release = false, "no new release");
        Outcome::NoRelease
    } else if options.dry_run {
        info!(next_version = %tag, new_release = true, "new release found, dry-run is enabled");
        Outcome::DryRun
    } else {
        info!(new_version = %tag, new_release = true, "new release found");
        let tag_oid = repo
            .create_release_tag(&tag, decision.head, &tag, signer)
            .map_err(|e| e.in_stage(Stage::CreateTag))?;
        info!(tag = %tag, signed = signer.is_some(), "new tag added to repository");
        Outcome::Tagged { tag_oid }
    };

    Ok(WorkflowResult {
        decision,
        tag,
        outcome,
    })
}
