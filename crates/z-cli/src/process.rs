//! Running external programs.
//!
//! Shell snippets from the config are run through `bash -c` after a `cd` into
//! the directory they belong to. All programs share the terminal with `z`.

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use thiserror::Error;
use tokio::process::{Child, Command};
use tracing::{debug, Instrument};
use z_common_log::spans;

pub use z_git::quote;

/// Failure of an external program.
#[derive(Debug, Error)]
pub enum ProcessError {
    #[error("unable to start `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {status}")]
    Failed { command: String, status: ExitStatus },
}

impl ProcessError {
    /// The command line that failed.
    pub fn command(&self) -> &str {
        match self {
            Self::Spawn { command, .. } | Self::Failed { command, .. } => command,
        }
    }

    /// Exit code of the program, if it ran and exited normally.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            Self::Failed { status, .. } => status.code(),
            Self::Spawn { .. } => None,
        }
    }
}

/// The command line running `snippet` inside `dir`.
pub fn in_dir(dir: &Path, snippet: &str) -> String {
    format!("cd {} ; {}", quote(&dir.to_string_lossy()), snippet)
}

fn bash(command_line: &str) -> Command {
    let mut cmd = Command::new("bash");
    cmd.arg("-c").arg(command_line);
    cmd
}

async fn status_of(mut cmd: Command, command: String) -> Result<(), ProcessError> {
    debug!(%command, "running");
    let status = cmd.status().await.map_err(|source| ProcessError::Spawn {
        command: command.clone(),
        source,
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(ProcessError::Failed { command, status })
    }
}

/// Run a shell snippet in `dir` with inherited stdio.
pub async fn run_shell(dir: &Path, snippet: &str) -> Result<(), ProcessError> {
    let line = in_dir(dir, snippet);
    status_of(bash(&line), line).await
}

/// Run a program with inherited stdio.
pub async fn run(program: &str, args: &[&str]) -> Result<(), ProcessError> {
    let mut cmd = Command::new(program);
    cmd.args(args);
    let line = std::iter::once(program)
        .chain(args.iter().copied())
        .collect::<Vec<_>>()
        .join(" ");
    status_of(cmd, line)
        .instrument(spans::command_span(program))
        .await
}

/// Start a shell snippet in `dir` in the background.
///
/// The child is killed when the returned handle is dropped.
pub fn spawn_shell(dir: &Path, snippet: &str) -> Result<Child, ProcessError> {
    let line = in_dir(dir, snippet);
    debug!(command = %line, "spawning in background");
    bash(&line)
        .stdin(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ProcessError::Spawn {
            command: line,
            source,
        })
}

/// Run a full bash command line, capturing stdout while the terminal stays
/// attached to stdin and stderr.
pub async fn capture_shell(command_line: &str) -> Result<(ExitStatus, String), ProcessError> {
    debug!(command = %command_line, "running with captured output");
    let output = bash(command_line)
        .stdin(Stdio::inherit())
        .stderr(Stdio::inherit())
        .stdout(Stdio::piped())
        .output()
        .await
        .map_err(|source| ProcessError::Spawn {
            command: command_line.to_string(),
            source,
        })?;

    Ok((
        output.status,
        String::from_utf8_lossy(&output.stdout).into_owned(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quote() {
        assert_eq!(quote("plain"), "'plain'");
        assert_eq!(quote("with space"), "'with space'");
        assert_eq!(quote("it's"), r"'it'\''s'");
    }

    #[test]
    fn test_in_dir() {
        assert_eq!(
            in_dir(Path::new("/notes/my note"), "nvim note.md"),
            "cd '/notes/my note' ; nvim note.md"
        );
    }

    #[tokio::test]
    async fn test_run_shell_in_dir() {
        let dir = tempfile::tempdir().unwrap();
        run_shell(dir.path(), "touch created").await.unwrap();
        assert!(dir.path().join("created").exists());
    }

    #[tokio::test]
    async fn test_run_shell_failure_carries_command() {
        let dir = tempfile::tempdir().unwrap();
        let err = run_shell(dir.path(), "exit 3").await.unwrap_err();
        assert_eq!(err.exit_code(), Some(3));
        assert!(err.command().ends_with("; exit 3"));
    }

    #[tokio::test]
    async fn test_run_missing_program() {
        let err = run("z-definitely-not-a-program", &["x"]).await.unwrap_err();
        assert!(matches!(err, ProcessError::Spawn { .. }));
        assert_eq!(err.command(), "z-definitely-not-a-program x");
    }

    #[tokio::test]
    async fn test_capture_shell() {
        let (status, out) = capture_shell("echo hello").await.unwrap();
        assert!(status.success());
        assert_eq!(out, "hello\n");
    }

    #[tokio::test]
    async fn test_spawned_child_is_killed_on_drop() {
        let dir = tempfile::tempdir().unwrap();
        let mut child = spawn_shell(dir.path(), "sleep 30").unwrap();
        assert!(child.try_wait().unwrap().is_none());
        drop(child);
    }
}
