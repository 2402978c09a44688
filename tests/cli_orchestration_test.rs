// tests/cli_orchestration_test.rs
mod common;

use std::process::Command;

use common::TestRepo;
use semver_release::cli::{run_local, run_local_with_signer, LocalOptions, Outcome};
use semver_release::domain::Version;
use semver_release::signing::Signer;
use semver_release::{ReleaseError, Stage};

const FAKE_SIGNATURE: &str =
    "-----BEGIN PGP SIGNATURE-----\n\nZmFrZQ==\n-----END PGP SIGNATURE-----\n";

/// Signer double returning a fixed armored block
struct FakeSigner;

impl Signer for FakeSigner {
    fn sign(&self, payload: &[u8]) -> semver_release::Result<String> {
        assert!(payload.starts_with(b"object "));
        Ok(FAKE_SIGNATURE.to_string())
    }
}

struct FailingSigner;

impl Signer for FailingSigner {
    fn sign(&self, _payload: &[u8]) -> semver_release::Result<String> {
        Err(ReleaseError::signing("no secret key"))
    }
}

fn options(test_repo: &TestRepo) -> LocalOptions {
    let mut options = LocalOptions::new(test_repo.path());
    options.tag_prefix = "v".to_string();
    options
}

#[test]
fn test_dry_run_does_not_tag() {
    let test_repo = TestRepo::new();
    test_repo.commits(&["feat: a", "fix: b"]);

    let mut options = options(&test_repo);
    options.dry_run = true;

    let result = run_local(&options).unwrap();

    assert_eq!(result.outcome, Outcome::DryRun);
    assert_eq!(result.tag, "v0.1.0");
    assert!(!test_repo.has_tag("v0.1.0"));
}

#[test]
fn test_release_creates_annotated_tag_on_head() {
    let test_repo = TestRepo::new();
    let head = test_repo.commits(&["feat: a", "fix: b"]);

    let result = run_local(&options(&test_repo)).unwrap();

    let Outcome::Tagged { tag_oid } = result.outcome else {
        panic!("expected a tag, got {:?}", result.outcome);
    };
    let tag = test_repo.repo.find_tag(tag_oid).unwrap();
    assert_eq!(tag.name(), Some("v0.1.0"));
    assert_eq!(tag.target_id(), head);
    assert!(tag.message().unwrap().starts_with("v0.1.0"));
    assert!(test_repo.has_tag("v0.1.0"));
}

#[test]
fn test_second_run_after_tagging_is_no_release() {
    let test_repo = TestRepo::new();
    test_repo.commit("feat: a");

    run_local(&options(&test_repo)).unwrap();
    let second = run_local(&options(&test_repo)).unwrap();

    assert_eq!(second.outcome, Outcome::NoRelease);
    assert_eq!(second.decision.version, Version::new(0, 1, 0));
    assert_eq!(second.decision.warnings.len(), 1);
}

#[test]
fn test_successive_releases() {
    let test_repo = TestRepo::new();
    test_repo.commit("fix: a");
    assert_eq!(run_local(&options(&test_repo)).unwrap().tag, "v0.0.1");

    test_repo.commit("feat: b");
    assert_eq!(run_local(&options(&test_repo)).unwrap().tag, "v0.1.0");

    test_repo.commit("feat!: c");
    assert_eq!(run_local(&options(&test_repo)).unwrap().tag, "v1.0.0");

    assert!(test_repo.has_tag("v0.0.1"));
    assert!(test_repo.has_tag("v0.1.0"));
    assert!(test_repo.has_tag("v1.0.0"));
}

#[test]
fn test_existing_tag_name_is_tag_error() {
    let test_repo = TestRepo::new();
    let base = test_repo.commit("chore: init");
    test_repo.branch("spike", base);
    let spike = test_repo.commit_on("refs/heads/spike", "feat: spike", &[base]);
    // Not reachable from main, so main still computes v0.1.0.
    test_repo.tag_lightweight("v0.1.0", spike);
    test_repo.commit("feat: a");

    let err = run_local(&options(&test_repo)).unwrap_err();

    assert_eq!(err.stage(), Some(Stage::CreateTag));
    assert!(matches!(err.root(), ReleaseError::Tag(_)));
    assert!(err.to_string().contains("already exists"));
}

#[test]
fn test_ci_output_is_appended() {
    let test_repo = TestRepo::new();
    test_repo.commit("feat: a");
    let output_dir = tempfile::tempdir().unwrap();
    let output_path = output_dir.path().join("github_output");

    let mut options = options(&test_repo);
    options.dry_run = true;
    options.ci_output = Some(output_path.clone());

    run_local(&options).unwrap();

    let text = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(text, "\nSEMVER=v0.1.0\nNEW_RELEASE=true\n");
}

#[test]
fn test_ci_output_without_release() {
    let test_repo = TestRepo::new();
    test_repo.commit("docs: readme");
    let output_dir = tempfile::tempdir().unwrap();
    let output_path = output_dir.path().join("github_output");

    let mut options = options(&test_repo);
    options.ci_output = Some(output_path.clone());

    let result = run_local(&options).unwrap();

    assert_eq!(result.outcome, Outcome::NoRelease);
    let text = std::fs::read_to_string(&output_path).unwrap();
    assert_eq!(text, "\nSEMVER=v0.0.0\nNEW_RELEASE=false\n");
}

#[test]
fn test_ci_output_in_missing_directory_is_ci_error() {
    let test_repo = TestRepo::new();
    test_repo.commit("feat: a");

    let mut options = options(&test_repo);
    options.ci_output = Some(test_repo.path().join("missing").join("output"));

    let err = run_local(&options).unwrap_err();
    assert_eq!(err.stage(), Some(Stage::CiOutput));
    assert!(matches!(err.root(), ReleaseError::Ci(_)));
}

#[test]
fn test_signed_tag_carries_signature() {
    let test_repo = TestRepo::new();
    let head = test_repo.commit("feat: a");

    let result = run_local_with_signer(&options(&test_repo), Some(&FakeSigner)).unwrap();

    let Outcome::Tagged { tag_oid } = result.outcome else {
        panic!("expected a tag, got {:?}", result.outcome);
    };
    let tag = test_repo.repo.find_tag(tag_oid).unwrap();
    assert_eq!(tag.name(), Some("v0.1.0"));
    assert_eq!(tag.target_id(), head);
    assert!(tag.message().unwrap().contains("BEGIN PGP SIGNATURE"));
    assert_eq!(tag.tagger().unwrap().name(), Some("Test User"));
}

#[test]
fn test_signing_failure_is_create_tag_error() {
    let test_repo = TestRepo::new();
    test_repo.commit("feat: a");

    let err = run_local_with_signer(&options(&test_repo), Some(&FailingSigner)).unwrap_err();

    assert_eq!(err.stage(), Some(Stage::CreateTag));
    assert!(matches!(err.root(), ReleaseError::Signing(_)));
    assert!(!test_repo.has_tag("v0.1.0"));
}

#[test]
fn test_missing_gpg_key_is_create_tag_error() {
    let test_repo = TestRepo::new();
    test_repo.commit("feat: a");

    let mut options = options(&test_repo);
    options.gpg_key_path = Some(test_repo.path().join("missing.asc"));

    let err = run_local(&options).unwrap_err();
    assert_eq!(err.stage(), Some(Stage::CreateTag));
    assert!(matches!(err.root(), ReleaseError::Signing(_)));
}

#[test]
fn test_missing_branch_reports_stage() {
    let test_repo = TestRepo::new();
    test_repo.commit("feat: a");

    let mut options = options(&test_repo);
    options.release_branch = "develop".to_string();

    let err = run_local(&options).unwrap_err();
    assert_eq!(err.stage(), Some(Stage::WalkHistory));
    assert!(err.to_string().contains("walking history failed"));
}

#[test]
fn test_bad_rules_file_reports_stage() {
    let test_repo = TestRepo::new();
    test_repo.commit("feat: a");
    let rules = test_repo.write_file("rules.toml", "[rules]\nhuge = [\"feat\"]\n");

    let mut options = options(&test_repo);
    options.rules_path = Some(rules);

    let err = run_local(&options).unwrap_err();
    assert_eq!(err.stage(), Some(Stage::LoadRules));
    assert!(matches!(err.root(), ReleaseError::Configuration(_)));
}

#[test]
fn test_binary_version_command() {
    let output = Command::new(env!("CARGO_BIN_EXE_semver-release"))
        .arg("version")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_binary_local_dry_run() {
    let test_repo = TestRepo::new();
    test_repo.commits(&["feat: a", "fix: b"]);

    let output = Command::new(env!("CARGO_BIN_EXE_semver-release"))
        .env_remove("GITHUB_OUTPUT")
        .env("NO_COLOR", "1")
        .args(["local", "--dry-run", "--tag-prefix", "v"])
        .arg(test_repo.path())
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("v0.1.0"), "stdout: {}", stdout);
    assert!(!test_repo.has_tag("v0.1.0"));
}

#[test]
fn test_binary_reports_errors_with_exit_code() {
    let dir = tempfile::tempdir().unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_semver-release"))
        .env_remove("GITHUB_OUTPUT")
        .arg("local")
        .arg(dir.path().join("nowhere"))
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("opening repository failed"), "stderr: {}", stderr);
}
