//! Command implementations.

mod complete;
mod create;
mod enumerate;
mod find;
mod init;
mod make;
mod open;
mod preview;
mod sync;
mod version;

pub use complete::CompleteCommand;
pub use create::CreateCommand;
pub use enumerate::EnumerateFilesCommand;
pub use find::FindCommand;
pub use init::InitCommand;
pub use make::{run_post_commands, MakeCommand};
pub use open::{open_entry, OpenCommand};
pub use preview::PreviewCommand;
pub use sync::SyncCommand;
pub use version::VersionCommand;
