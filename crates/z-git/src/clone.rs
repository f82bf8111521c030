//! Cloning Ks with the user's `git`.
//!
//! Cloning shells out so that the user's SSH agent and credential helpers
//! apply.

use crate::{GitError, GitResult};
use std::path::Path;
use tokio::process::Command;
use tracing::debug;

/// Run `git clone <url> <path>` with inherited stdio.
pub async fn clone(url: &str, path: impl AsRef<Path>) -> GitResult<()> {
    let path = path.as_ref();
    let mut cmd = Command::new("git");
    cmd.arg("clone").arg(url).arg(path);
    debug!(command = ?cmd.as_std(), "running clone");

    let status = cmd.status().await?;
    if status.success() {
        Ok(())
    } else {
        Err(GitError::CommandFailed {
            command: format!("git clone {url} {}", path.display()),
            status: status.to_string(),
        })
    }
}
