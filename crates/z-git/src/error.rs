//! Git error types.

use thiserror::Error;

/// Git operation error.
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found.
    #[error("repository not found at {path}")]
    RepoNotFound { path: String },

    /// Remote not found.
    #[error("remote not found: {name}")]
    RemoteNotFound { name: String },

    /// An external git invocation exited unsuccessfully.
    #[error("`{command}` failed ({status})")]
    CommandFailed { command: String, status: String },

    /// Git2 library error.
    #[error("git error: {0}")]
    Git2(#[from] git2::Error),

    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Git operations.
pub type GitResult<T> = Result<T, GitError>;

impl GitError {
    /// Check if this error means "nothing there" rather than a failure.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::RepoNotFound { .. } | Self::RemoteNotFound { .. } => true,
            Self::Git2(e) => e.code() == git2::ErrorCode::NotFound,
            _ => false,
        }
    }
}
