//! Open command implementation.

use std::path::Path;

use clap::Parser;
use tracing::info;
use z_common_config::{ZMeta, ZType};

use crate::cli::CommandContext;
use crate::commands::make::run_post_commands;
use crate::error::CliError;
use crate::process;
use crate::prompts;

/// Open a file or note with the appropriate program
#[derive(Debug, Parser)]
pub struct OpenCommand {
    /// The K containing the file
    pub k: String,

    /// The file, relative to the K
    pub file: String,

    /// The Z-type of the file (Z, D, F, S or O)
    #[arg(value_name = "TYPE")]
    pub ztype: String,
}

impl OpenCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        open_entry(ctx, &self.k, &self.file, &self.ztype).await
    }
}

const NO_ARGS: &[&str] = &[];
const FEH_ARGS: &[&str] = &["--image-bg=white"];

/// Program and leading arguments used to open a file with extension `ext`.
pub fn opener_for(ext: &str) -> Option<(&'static str, &'static [&'static str])> {
    match ext {
        "md" | "txt" | "tex" => Some(("nvim", NO_ARGS)),
        "png" | "jpg" | "jpeg" | "tif" => Some(("feh", FEH_ARGS)),
        "pdf" => Some(("zathura", NO_ARGS)),
        "html" => Some(("firefox", NO_ARGS)),
        "xopp" => Some(("xournalpp", NO_ARGS)),
        _ => None,
    }
}

fn extension(path: &Path) -> String {
    path.extension()
        .map(|e| e.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Open one entry of a K.
pub async fn open_entry(
    ctx: &CommandContext,
    k_id: &str,
    file: &str,
    ztype: &str,
) -> Result<(), CliError> {
    let full_path = ctx.existing_file(k_id, file)?;
    let ztype: ZType = ztype.parse()?;

    match ztype {
        ZType::Note => open_note(&full_path).await,
        ZType::Dir => Err(CliError::user_with_hint(
            format!("opening plain directories is not supported ('{file}')"),
            "open a file inside it instead",
        )),
        ZType::File | ZType::Source | ZType::Object => {
            open_file(&full_path).await?;
            if ztype == ZType::Source {
                run_note_post(&full_path).await?;
            }
            Ok(())
        }
    }
}

async fn open_note(dir: &Path) -> Result<(), CliError> {
    let meta = ZMeta::read(dir)?;

    // Killed when dropped at the end of this function.
    let _viewer = if meta.view.is_empty() {
        None
    } else {
        info!(command = %meta.view, "running view command");
        Some(
            process::spawn_shell(dir, &meta.view)
                .map_err(|e| CliError::command("could not start view command", e))?,
        )
    };

    process::run_shell(dir, &meta.open).await.map_err(|e| {
        CliError::command(
            format!(
                "could not run open command from '{}'",
                ZMeta::path_in(dir).display()
            ),
            e,
        )
    })?;

    run_post_commands(dir, &meta.post).await
}

async fn open_file(path: &Path) -> Result<(), CliError> {
    let ext = extension(path);
    let path_str = path.to_string_lossy();

    let (program, leading) = match opener_for(&ext) {
        Some(opener) => opener,
        None => {
            prompts::confirm_stdin(&format!("unknown file extension '{ext}', try 'nvim'?"))?;
            ("nvim", NO_ARGS)
        }
    };

    let mut args: Vec<&str> = leading.to_vec();
    args.push(path_str.as_ref());
    process::run(program, &args)
        .await
        .map_err(|e| CliError::command("open command error", e))
}

async fn run_note_post(source: &Path) -> Result<(), CliError> {
    let Some(dir) = source.parent() else {
        return Ok(());
    };
    let meta = ZMeta::read(dir).map_err(|e| {
        CliError::config_with_hint(
            format!("unable to read .z/z.yml to do post hooks ({e})"),
            "open source files of notes created from a blueprint",
        )
    })?;
    run_post_commands(dir, &meta.post).await
}
