//! Export of a release decision to CI key/value outputs.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

use crate::engine::ReleaseDecision;
use crate::error::{ReleaseError, Result};

/// Writes decisions in the GitHub Actions `$GITHUB_OUTPUT` format
pub struct GithubOutput<W: Write> {
    sink: W,
}

impl GithubOutput<std::fs::File> {
    /// Append to the output file at `path`, creating it if needed
    pub fn append_to(path: &Path) -> Result<Self> {
        let file = OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)
            .map_err(|e| {
                ReleaseError::ci(format!("cannot open '{}': {}", path.display(), e))
            })?;
        Ok(GithubOutput::new(file))
    }
}

impl<W: Write> GithubOutput<W> {
    pub fn new(sink: W) -> Self {
        GithubOutput { sink }
    }

    /// Write `SEMVER` (prefixed version) and `NEW_RELEASE`
    pub fn write_decision(&mut self, prefix: &str, decision: &ReleaseDecision) -> Result<()> {
        write!(
            self.sink,
            "\nSEMVER={}\nNEW_RELEASE={}\n",
            decision.tag_name(prefix),
            decision.is_release
        )
        .and_then(|_| self.sink.flush())
        .map_err(|e| ReleaseError::ci(format!("cannot write output: {}", e)))
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}
