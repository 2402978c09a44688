//! Domain logic - pure business rules independent of git operations

pub mod commit;
pub mod precedence;
pub mod rules;
pub mod tag;
pub mod version;

pub use commit::{ClassifiedCommit, Commit, ConventionalCommit};
pub use precedence::Precedence;
pub use rules::RuleSet;
pub use tag::{format_tag_name, TagName, TagRef};
pub use version::Version;
