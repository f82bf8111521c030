//! Make command implementation.

use std::path::{Path, PathBuf};

use clap::{Parser, ValueHint};
use tracing::{info, Instrument};
use z_common_config::ZMeta;
use z_common_log::spans;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::process;

/// Run the post commands of a note
#[derive(Debug, Parser)]
pub struct MakeCommand {
    /// The note directory to run in
    #[arg(short = 'C', long = "directory", default_value = ".", value_hint = ValueHint::DirPath)]
    pub directory: PathBuf,
}

impl MakeCommand {
    pub async fn execute(&self, _ctx: &CommandContext) -> Result<(), CliError> {
        let meta = ZMeta::read(&self.directory)?;
        run_post_commands(&self.directory, &meta.post)
            .instrument(spans::note_span(&self.directory.to_string_lossy()))
            .await
    }
}

/// Run `post` snippets in order inside `dir`, stopping at the first failure.
pub async fn run_post_commands(dir: &Path, post: &[String]) -> Result<(), CliError> {
    for (i, command) in post.iter().enumerate() {
        info!(i, %command, "running post command");
        process::run_shell(dir, command).await.map_err(|e| {
            CliError::command(
                format!(
                    "unable to run post command {i} from '{}'",
                    ZMeta::path_in(dir).display()
                ),
                e,
            )
        })?;
    }
    Ok(())
}
