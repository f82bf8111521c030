//! Find command implementation.
//!
//! Both modes hand a list to `fzf` and open what the user picks.

use std::path::Path;
use std::process::{ExitStatus, Stdio};

use clap::{Parser, Subcommand};
use tokio::io::AsyncWriteExt;
use tokio::process::Command;
use tracing::{debug, warn};
use z_common_config::{ZConfig, ZMeta, ZType};

use crate::catalog::{self, Columns};
use crate::cli::CommandContext;
use crate::commands::open::open_entry;
use crate::error::CliError;
use crate::process::{self, quote, ProcessError};

/// Find notes by text content or file name
#[derive(Debug, Parser)]
pub struct FindCommand {
    #[command(subcommand)]
    pub target: FindTarget,
}

/// What to search
#[derive(Debug, Subcommand)]
pub enum FindTarget {
    /// Search the text of all files with rg
    #[command(visible_alias = "t")]
    Text,

    /// Search file names
    #[command(visible_alias = "f")]
    File,
}

impl FindCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        match self.target {
            FindTarget::Text => find_text(ctx).await,
            FindTarget::File => find_file(ctx).await,
        }
    }
}

fn require(program: &str) -> Result<(), CliError> {
    which::which(program).map(|_| ()).map_err(|_| {
        CliError::user_with_hint(
            format!("'{program}' was not found on PATH"),
            format!("install {program} to use 'z find'"),
        )
    })
}

/// fzf exits 1 when nothing matched and 130 when interrupted.
fn nothing_selected(status: ExitStatus) -> bool {
    matches!(status.code(), Some(1) | Some(130))
}

/// Non-empty lines of fzf's output.
fn selected_lines(output: &str) -> Vec<&str> {
    output.lines().filter(|l| !l.is_empty()).collect()
}

enum Selection<'a> {
    Nothing,
    One(&'a str),
    Many(usize),
}

fn selection<'a>(
    status: ExitStatus,
    output: &'a str,
    command: &str,
) -> Result<Selection<'a>, CliError> {
    if nothing_selected(status) {
        return Ok(Selection::Nothing);
    }
    if !status.success() {
        return Err(CliError::command(
            "fzf failed",
            ProcessError::Failed {
                command: command.to_string(),
                status,
            },
        ));
    }

    let lines = selected_lines(output);
    Ok(match lines[..] {
        [] => Selection::Nothing,
        [line] => Selection::One(line),
        _ => Selection::Many(lines.len()),
    })
}

async fn find_file(ctx: &CommandContext) -> Result<(), CliError> {
    require("fzf")?;

    let mut listing = Vec::new();
    catalog::write_catalog(&ctx.config, Columns::ENTRY, &mut listing)?;

    let exe = std::env::current_exe()?;
    let preview = format!("{} preview {{}}", quote(&exe.to_string_lossy()));
    let command = format!("fzf --preview {}", quote(&preview));
    debug!(%command, "starting fzf");

    let mut child = Command::new("fzf")
        .arg("--preview")
        .arg(&preview)
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::inherit())
        .spawn()
        .map_err(|source| {
            CliError::command(
                "could not start fzf",
                ProcessError::Spawn {
                    command: command.clone(),
                    source,
                },
            )
        })?;

    if let Some(mut stdin) = child.stdin.take() {
        if let Err(e) = stdin.write_all(&listing).await {
            // fzf may exit before reading everything
            if e.kind() != std::io::ErrorKind::BrokenPipe {
                return Err(e.into());
            }
        }
    }

    let output = child.wait_with_output().await?;
    let stdout = String::from_utf8_lossy(&output.stdout);

    match selection(output.status, &stdout, &command)? {
        Selection::Nothing => println!("nothing selected, exiting..."),
        Selection::One(line) => {
            let fields: Vec<&str> = line.split('\t').collect();
            match fields[..] {
                [k, file, ztype] => open_entry(ctx, k, file, ztype).await?,
                _ => {
                    return Err(CliError::validation(format!(
                        "unexpected selection '{line}'"
                    )))
                }
            }
        }
        Selection::Many(n) => warn!(selected = n, "unable to open multiple files right now"),
    }
    Ok(())
}

fn sed_escape(path: &str) -> String {
    path.replace('/', r"\/")
}

/// The `rg | sed | fzf` pipeline searching all Ks.
///
/// rg prints `<path>/<file> <line> <text>`; the K path prefix is rewritten to
/// `<K> ` so that fzf shows `<K> <file> <line> <text>`. The preview reverses
/// the rewrite to find the file again.
pub fn text_search_pipeline(config: &ZConfig) -> String {
    let mut paths = String::new();
    let mut path_to_k = String::new();
    let mut k_to_path = String::new();

    for (id, k) in &config.ks {
        let escaped = sed_escape(&k.path);
        paths.push(' ');
        paths.push_str(&quote(&k.path));
        path_to_k.push_str(&format!(r#" | sed "s/^{escaped}\//{id} /""#));
        k_to_path.push_str(&format!(r#" | sed "s/^{id} /{escaped}\//""#));
    }

    let preview = format!(
        "bat --color=always --decorations=never $(echo {{1..2}}{k_to_path}) --highlight-line {{3}}"
    );

    format!(
        "rg --line-number --with-filename . --color=never --field-match-separator ' '{paths}{path_to_k} | fzf --ansi --preview {}",
        quote(&preview)
    )
}

/// Z-type of a file found by text search.
fn text_hit_type(config: &ZConfig, k_id: &str, file: &str) -> ZType {
    let Some(k) = config.k(k_id) else {
        return ZType::File;
    };
    let full_path = Path::new(&k.path).join(file);
    let (Some(dir), Some(name)) = (full_path.parent(), full_path.file_name()) else {
        return ZType::File;
    };
    match ZMeta::read(dir) {
        Ok(meta) => meta.classify(&name.to_string_lossy()),
        Err(_) => ZType::File,
    }
}

async fn find_text(ctx: &CommandContext) -> Result<(), CliError> {
    require("rg")?;
    require("fzf")?;

    let command = text_search_pipeline(&ctx.config);
    let (status, stdout) = process::capture_shell(&command)
        .await
        .map_err(|e| CliError::command("error starting search", e))?;

    match selection(status, &stdout, &command)? {
        Selection::Nothing => println!("nothing selected, exiting..."),
        Selection::One(line) => {
            let tokens: Vec<&str> = line.split(' ').collect();
            if tokens.len() < 4 {
                return Err(CliError::validation(format!(
                    "expected at least 4 tokens to be returned by fzf (got {})",
                    tokens.len()
                )));
            }
            let (k_id, file) = (tokens[0], tokens[1]);
            let ztype = text_hit_type(&ctx.config, k_id, file);
            open_entry(ctx, k_id, file, ztype.as_str()).await?;
        }
        Selection::Many(n) => warn!(selected = n, "unable to open multiple files right now"),
    }
    Ok(())
}
