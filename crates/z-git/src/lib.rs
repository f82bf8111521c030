//! Git integration for z.
//!
//! Local inspection (init, remotes, ahead/behind) goes through git2. Network
//! operations (clone, the sync script) shell out to the user's `git`.

pub mod clone;
pub mod error;
pub mod remote_url;
pub mod repository;
pub mod sync;

pub use clone::clone;
pub use error::{GitError, GitResult};
pub use remote_url::{normalize_url, urls_match};
pub use repository::{is_repo, GitRepository, ORIGIN};
pub use sync::{quote, sync_script};
