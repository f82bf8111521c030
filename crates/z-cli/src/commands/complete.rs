//! Dynamic completion candidates.
//!
//! Shell completion hooks call `z complete <words...>` with the words typed
//! after `z`; the last word is the one being completed.

use std::path::Path;

use clap::{CommandFactory, Parser};
use z_common_config::{ZConfig, ZMeta, ZType};

use crate::cli::{Cli, CommandContext};
use crate::error::CliError;

/// Print completion candidates for a partial command line
#[derive(Debug, Parser)]
pub struct CompleteCommand {
    /// Words after `z`, the last one being completed
    #[arg(num_args = 0.., trailing_var_arg = true, allow_hyphen_values = true)]
    pub words: Vec<String>,
}

impl CompleteCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        for suggestion in suggestions(&ctx.config, &self.words) {
            println!("{suggestion}");
        }
        Ok(())
    }
}

fn all_types() -> Vec<String> {
    ZType::ALL.iter().map(|t| t.to_string()).collect()
}

fn subcommands() -> Vec<String> {
    Cli::command()
        .get_subcommands()
        .filter(|c| !c.is_hide_set())
        .map(|c| c.get_name().to_string())
        .collect()
}

fn k_entries(config: &ZConfig, k_id: &str) -> Vec<String> {
    let Some(k) = config.k(k_id) else {
        return Vec::new();
    };
    let Ok(entries) = std::fs::read_dir(&k.path) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .filter(|name| !name.starts_with('.'))
        .collect();
    names.sort();
    names
}

/// The Z-types `file` in K `k_id` can be opened as, judged from disk.
pub fn infer_types(config: &ZConfig, k_id: &str, file: &str) -> Vec<String> {
    let Some(k) = config.k(k_id) else {
        return all_types();
    };
    let k_root = Path::new(&k.path);

    let mut relative = Path::new(file);
    if relative.is_absolute() {
        match relative.strip_prefix(k_root) {
            Ok(inside) => relative = inside,
            Err(_) => return all_types(),
        }
    }

    let full_path = k_root.join(relative);
    let Ok(metadata) = std::fs::metadata(&full_path) else {
        return all_types();
    };

    if metadata.is_dir() {
        let ztype = match ZMeta::read(&full_path) {
            Ok(_) => ZType::Note,
            Err(_) => ZType::Dir,
        };
        return vec![ztype.to_string()];
    }

    match relative.parent().filter(|p| !p.as_os_str().is_empty()) {
        None => vec![ZType::File.to_string()],
        Some(dir) => {
            let name = relative
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            match ZMeta::read(k_root.join(dir)).map(|meta| meta.classify(&name)) {
                Ok(t @ (ZType::Source | ZType::Object)) => vec![t.to_string()],
                _ => all_types(),
            }
        }
    }
}

/// Candidates for the last of `words`, filtered by it as a prefix.
pub fn suggestions(config: &ZConfig, words: &[String]) -> Vec<String> {
    let Some((prefix, _)) = words.split_last() else {
        return subcommands();
    };

    let candidates = match words {
        [_] => subcommands(),
        [cmd, _] if cmd == "create" || cmd == "c" || cmd == "open" => {
            config.k_ids().map(str::to_string).collect()
        }
        [cmd, _, _, _] if cmd == "create" || cmd == "c" => {
            config.blueprint_ids().map(str::to_string).collect()
        }
        [cmd, k, _] if cmd == "open" => k_entries(config, k),
        [cmd, k, file, _] if cmd == "open" => infer_types(config, k, file),
        _ => Vec::new(),
    };

    candidates
        .into_iter()
        .filter(|c| c.starts_with(prefix.as_str()))
        .collect()
}
