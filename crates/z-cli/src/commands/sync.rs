//! Sync command implementation.

use std::io::ErrorKind;
use std::path::Path;

use clap::Parser;
use tracing::{error, info, Instrument};
use z_common_config::K;
use z_common_log::spans;

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::process;

/// Sync all Ks with their git remotes
#[derive(Debug, Parser)]
pub struct SyncCommand {}

/// What happened to one K.
#[derive(Debug, PartialEq, Eq)]
enum SyncOutcome {
    Skipped,
    Cloned,
    Updated,
    Failed(String),
}

fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

async fn sync_k(id: &str, k: &K) -> SyncOutcome {
    if !k.is_remote() {
        info!("skipping K '{id}' (manual sync)");
        return SyncOutcome::Skipped;
    }
    info!("syncing K '{id}' (auto sync)");

    let path = Path::new(&k.path);
    match std::fs::metadata(path) {
        Ok(_) => {}
        Err(e) if e.kind() == ErrorKind::NotFound => {
            info!(path = %path.display(), "K's path does not exist, initializing it by git clone");
            if let Err(e) = z_git::clone(&k.url, path).await {
                error!(error = %e, "error executing clone command");
            }
            info!("as K was just cloned, skipped pull/push for it");
            return SyncOutcome::Cloned;
        }
        Err(e) => {
            return SyncOutcome::Failed(format!(
                "{id} could not be synced!\nstat error for '{}' ({e})",
                path.display()
            ));
        }
    }

    println!("updating {id}");
    let script = z_git::sync_script(id, &today());
    match process::run_shell(path, &script).await {
        Ok(()) => SyncOutcome::Updated,
        Err(e) => {
            error!(error = %e, "sync failed");
            SyncOutcome::Failed(format!(
                "{id} could not be synced!\nDo `cd '{}'` and resolve it there.",
                path.display()
            ))
        }
    }
}

impl SyncCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let mut failures = Vec::new();

        for (id, k) in &ctx.config.ks {
            let outcome = sync_k(id, k).instrument(spans::k_span(id)).await;
            if let SyncOutcome::Failed(message) = outcome {
                failures.push((id.clone(), message));
            }
        }

        if failures.is_empty() {
            return Ok(());
        }

        for (_, message) in &failures {
            println!("{message}\n");
        }
        let ids: Vec<_> = failures.into_iter().map(|(id, _)| id).collect();
        Err(CliError::Command {
            message: format!("some Ks could not be synced: {}", ids.join(", ")),
            command: "sync".to_string(),
            source: None,
        })
    }
}
