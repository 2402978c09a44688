//! Command workflows behind the binary's subcommands

pub mod orchestration;

pub use orchestration::{
    run_local, run_local_with_signer, LocalOptions, Outcome, WorkflowResult,
    DEFAULT_RELEASE_BRANCH,
};
