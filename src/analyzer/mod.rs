//! Analysis engine for determining the next version from history

pub mod calculator;
pub mod classifier;
pub mod history;

pub use calculator::{highest_precedence, next_version, NextVersion};
pub use classifier::CommitClassifier;
pub use history::{find_unreleased_commits, HistoryWalker, LastRelease, UnreleasedHistory};
