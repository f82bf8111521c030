//! Repository wrapper for the local inspections `z init` needs.

use crate::{GitError, GitResult};
use git2::{BranchType, Repository as Git2Repo};
use std::path::{Path, PathBuf};

/// Name of the remote Ks are cloned from.
pub const ORIGIN: &str = "origin";

/// Check whether `path` holds a non-bare repository (`path/.git` exists).
pub fn is_repo(path: impl AsRef<Path>) -> bool {
    path.as_ref().join(".git").exists()
}

/// A git repository at the root of a K.
pub struct GitRepository {
    repo: Git2Repo,
    root: PathBuf,
}

impl GitRepository {
    /// Open a repository at an exact path.
    pub fn open(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::open(path).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::RepoNotFound {
                    path: path.display().to_string(),
                }
            } else {
                GitError::Git2(e)
            }
        })?;

        Ok(Self {
            repo,
            root: path.to_path_buf(),
        })
    }

    /// Initialize a new repository.
    pub fn init(path: impl AsRef<Path>) -> GitResult<Self> {
        let path = path.as_ref();
        let repo = Git2Repo::init(path)?;
        Ok(Self {
            repo,
            root: path.to_path_buf(),
        })
    }

    /// Working directory of the repository.
    pub fn root_path(&self) -> &Path {
        &self.root
    }

    /// URL of a remote.
    pub fn remote_url(&self, name: &str) -> GitResult<String> {
        let remote = self.repo.find_remote(name).map_err(|e| {
            if e.code() == git2::ErrorCode::NotFound {
                GitError::RemoteNotFound {
                    name: name.to_string(),
                }
            } else {
                GitError::Git2(e)
            }
        })?;

        remote
            .url()
            .map(str::to_string)
            .ok_or_else(|| GitError::RemoteNotFound {
                name: name.to_string(),
            })
    }

    /// URL of `origin`.
    pub fn origin_url(&self) -> GitResult<String> {
        self.remote_url(ORIGIN)
    }

    /// Point `origin` at a new URL.
    pub fn set_origin_url(&self, url: &str) -> GitResult<()> {
        self.repo.remote_set_url(ORIGIN, url)?;
        Ok(())
    }

    /// Add `origin`.
    pub fn add_origin(&self, url: &str) -> GitResult<()> {
        self.repo.remote(ORIGIN, url)?;
        Ok(())
    }

    /// Whether the current branch has commits its upstream lacks.
    ///
    /// A detached or unborn HEAD, or a branch without upstream, has nothing
    /// to push.
    pub fn has_unpushed_commits(&self) -> GitResult<bool> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(_) => return Ok(false),
        };
        if !head.is_branch() {
            return Ok(false);
        }

        let Some(name) = head.shorthand() else {
            return Ok(false);
        };
        let branch = self.repo.find_branch(name, BranchType::Local)?;
        let upstream = match branch.upstream() {
            Ok(upstream) => upstream,
            Err(_) => return Ok(false),
        };

        let (Some(local), Some(remote)) = (head.target(), upstream.get().target()) else {
            return Ok(false);
        };
        let (ahead, _behind) = self.repo.graph_ahead_behind(local, remote)?;
        Ok(ahead > 0)
    }
}
