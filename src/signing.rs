//! Optional signing capability used when creating release tags.

use std::io::Write;
use std::path::Path;
use std::process::{Command, Stdio};

use tempfile::TempDir;
use tracing::debug;

use crate::error::{ReleaseError, Result};

/// Produces an ASCII-armored detached signature over a payload
pub trait Signer {
    fn sign(&self, payload: &[u8]) -> Result<String>;
}

/// Signs with the `gpg` executable using a key imported into a private,
/// temporary GnuPG home so the user's keyring is left untouched.
pub struct GpgSigner {
    home: TempDir,
    program: String,
}

impl GpgSigner {
    /// Import an armored private key from `path`
    pub fn from_armored_key(path: &Path) -> Result<Self> {
        Self::with_program("gpg", path)
    }

    /// Like [`GpgSigner::from_armored_key`] with an explicit gpg executable
    pub fn with_program(program: impl Into<String>, path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(ReleaseError::signing(format!(
                "key file '{}' does not exist",
                path.display()
            )));
        }

        let home = tempfile::Builder::new()
            .prefix("semver-release-gnupg")
            .tempdir()?;
        restrict_permissions(home.path())?;

        let signer = GpgSigner {
            home,
            program: program.into(),
        };

        let output = signer
            .command()
            .arg("--import")
            .arg(path)
            .output()
            .map_err(|e| signer.spawn_error(e))?;

        if !output.status.success() {
            return Err(ReleaseError::signing(format!(
                "cannot import key '{}': {}",
                path.display(),
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        debug!(key = %path.display(), "imported signing key");
        Ok(signer)
    }

    fn command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .arg("--batch")
            .arg("--no-tty")
            .arg("--homedir")
            .arg(self.home.path());
        command
    }

    fn spawn_error(&self, e: std::io::Error) -> ReleaseError {
        ReleaseError::signing(format!("cannot run '{}': {}", self.program, e))
    }
}

impl Signer for GpgSigner {
    fn sign(&self, payload: &[u8]) -> Result<String> {
        let mut child = self
            .command()
            .args(["--armor", "--detach-sign", "--output", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| self.spawn_error(e))?;

        if let Some(mut stdin) = child.stdin.take() {
            stdin.write_all(payload)?;
        }

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(ReleaseError::signing(format!(
                "gpg failed to sign: {}",
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }

        String::from_utf8(output.stdout)
            .map_err(|_| ReleaseError::signing("gpg produced a non UTF-8 signature"))
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    std::fs::set_permissions(path, std::fs::Permissions::from_mode(0o700))?;
    Ok(())
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
