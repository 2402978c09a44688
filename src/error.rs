use std::fmt;

use thiserror::Error;

/// Pipeline stage an error was raised in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    OpenRepository,
    LoadRules,
    WalkHistory,
    Classify,
    Calculate,
    CreateTag,
    CiOutput,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::OpenRepository => "opening repository",
            Stage::LoadRules => "loading rules",
            Stage::WalkHistory => "walking history",
            Stage::Classify => "classifying commits",
            Stage::Calculate => "calculating version",
            Stage::CreateTag => "creating tag",
            Stage::CiOutput => "writing CI output",
        };
        f.write_str(name)
    }
}

/// Unified error type for semver-release operations
#[derive(Error, Debug)]
pub enum ReleaseError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Reference not found: {0}")]
    ReferenceNotFound(String),

    #[error("Repository error: {0}")]
    Repository(#[from] git2::Error),

    #[error("Tag error: {0}")]
    Tag(String),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("CI output error: {0}")]
    Ci(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{stage} failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<ReleaseError>,
    },
}

/// Convenience type alias for Results in semver-release
pub type Result<T> = std::result::Result<T, ReleaseError>;

impl ReleaseError {
    /// Create a configuration error with context
    pub fn configuration(msg: impl Into<String>) -> Self {
        ReleaseError::Configuration(msg.into())
    }

    /// Create a reference-not-found error with context
    pub fn reference_not_found(msg: impl Into<String>) -> Self {
        ReleaseError::ReferenceNotFound(msg.into())
    }

    /// Create a tag error with context
    pub fn tag(msg: impl Into<String>) -> Self {
        ReleaseError::Tag(msg.into())
    }

    /// Create a signing error with context
    pub fn signing(msg: impl Into<String>) -> Self {
        ReleaseError::Signing(msg.into())
    }

    /// Create a CI output error with context
    pub fn ci(msg: impl Into<String>) -> Self {
        ReleaseError::Ci(msg.into())
    }

    /// Wrap this error with the stage that produced it.
    ///
    /// An error that already carries a stage is returned as-is so the
    /// innermost stage wins.
    pub fn in_stage(self, stage: Stage) -> Self {
        match self {
            already @ ReleaseError::Stage { .. } => already,
            other => ReleaseError::Stage {
                stage,
                source: Box::new(other),
            },
        }
    }

    /// Stage the error was raised in, if it was wrapped
    pub fn stage(&self) -> Option<Stage> {
        match self {
            ReleaseError::Stage { stage, .. } => Some(*stage),
            _ => None,
        }
    }

    /// The underlying error with any stage context removed
    pub fn root(&self) -> &ReleaseError {
        match self {
            ReleaseError::Stage { source, .. } => source.root(),
            other => other,
        }
    }
}
