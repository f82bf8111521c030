//! Enumerate-files command implementation.

use std::io::Write;

use clap::Parser;

use crate::catalog::{self, Columns};
use crate::cli::CommandContext;
use crate::error::CliError;

/// List all files across all Ks
#[derive(Debug, Parser)]
pub struct EnumerateFilesCommand {
    /// Show the K id
    #[arg(long)]
    pub k: bool,

    /// Show the file name relative to the K
    #[arg(long)]
    pub file_name: bool,

    /// Show the Z-type
    #[arg(long)]
    pub file_type: bool,

    /// Show the full path
    #[arg(long)]
    pub full_path: bool,
}

impl EnumerateFilesCommand {
    /// Selected columns; no flag at all selects the entry line columns
    pub fn columns(&self) -> Columns {
        let selected = Columns {
            k: self.k,
            file_name: self.file_name,
            file_type: self.file_type,
            full_path: self.full_path,
        };
        if selected.any() {
            selected
        } else {
            Columns::ENTRY
        }
    }

    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let stdout = std::io::stdout();
        let mut out = std::io::BufWriter::new(stdout.lock());
        catalog::write_catalog(&ctx.config, self.columns(), &mut out)?;
        out.flush()?;
        Ok(())
    }
}
