//! Preview command implementation.

use std::path::Path;

use clap::Parser;
use tracing::warn;
use z_common_config::{ZMeta, ZType};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::process;

/// Terminal width used when the real one is unknown.
const FALLBACK_WIDTH: u16 = 80;

/// Preview an entry line
#[derive(Debug, Parser)]
pub struct PreviewCommand {
    /// A single entry line: K, file and type separated by tabs
    #[arg(value_name = "ENTRY", num_args = 0.., allow_hyphen_values = true)]
    pub entry: Vec<String>,
}

/// Split an entry line into K, file and type.
pub fn parse_entry_line(args: &[String]) -> Result<(&str, &str, &str), CliError> {
    let [line] = args else {
        return Err(CliError::validation(format!(
            "expected a single (single-quoted) argument for 'preview' but got {}",
            args.len()
        )));
    };

    let fields: Vec<&str> = line.split('\t').collect();
    match fields[..] {
        [k, file, ztype] => Ok((k, file, ztype)),
        _ => Err(CliError::validation(format!(
            "expected three tab-separated fields in '{line}' but got {}",
            fields.len()
        ))),
    }
}

fn terminal_width() -> u16 {
    match terminal_size::terminal_size() {
        Some((terminal_size::Width(w), _)) => w,
        None => {
            warn!("don't have terminal width, assuming {FALLBACK_WIDTH}");
            FALLBACK_WIDTH
        }
    }
}

/// Program and arguments previewing a file with extension `ext`.
pub fn previewer_for(ext: &str, path: &str, width: u16) -> Option<(&'static str, Vec<String>)> {
    let args = |list: &[&str]| list.iter().map(|s| s.to_string()).collect::<Vec<_>>();
    match ext {
        "txt" | "md" | "tex" | "bib" => Some((
            "bat",
            args(&["--color", "always", "--decorations", "never", path]),
        )),
        "jpeg" | "jpg" | "png" | "tif" | "gif" => Some((
            "catimg",
            args(&["-w", &(u32::from(width) * 2).to_string(), path]),
        )),
        "pdf" => Some(("pdftotext", args(&[path, "-"]))),
        "html" => Some(("w3m", args(&["-dump", path, "-cols", &width.to_string()]))),
        _ => None,
    }
}

impl PreviewCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let (k_id, file, ztype) = parse_entry_line(&self.entry)?;
        let full_path = ctx.existing_file(k_id, file)?;
        let ztype: ZType = ztype.parse()?;
        let width = terminal_width();

        match ztype {
            ZType::Note => {
                let meta = ZMeta::read(&full_path)?;
                let yaml = serde_yaml::to_string(&meta)
                    .map_err(|e| CliError::Other(anyhow::Error::new(e)))?;
                print!("{yaml}");
                Ok(())
            }
            ZType::Dir => run_previewer("ls", vec!["-a1".into(), display(&full_path)]).await,
            ZType::File | ZType::Source | ZType::Object => {
                let ext = full_path
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default();
                match previewer_for(&ext, &display(&full_path), width) {
                    Some((program, args)) => run_previewer(program, args).await,
                    None => {
                        let dotted = if ext.is_empty() { ext } else { format!(".{ext}") };
                        println!("extension '{dotted}' not previewable");
                        Ok(())
                    }
                }
            }
        }
    }
}

fn display(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}

async fn run_previewer(program: &str, args: Vec<String>) -> Result<(), CliError> {
    let args: Vec<&str> = args.iter().map(String::as_str).collect();
    process::run(program, &args)
        .await
        .map_err(|e| CliError::command("error running preview command", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entry_line() {
        let args = vec!["work\tpaper/paper.tex\tS".to_string()];
        assert_eq!(
            parse_entry_line(&args).unwrap(),
            ("work", "paper/paper.tex", "S")
        );
    }

    #[test]
    fn test_parse_entry_line_rejects_bad_input() {
        let none: Vec<String> = vec![];
        assert_eq!(parse_entry_line(&none).unwrap_err().code(), 5);

        let two = vec!["a".to_string(), "b".to_string()];
        assert_eq!(parse_entry_line(&two).unwrap_err().code(), 5);

        let short = vec!["work\tfile".to_string()];
        assert_eq!(parse_entry_line(&short).unwrap_err().code(), 5);
    }

    #[test]
    fn test_previewers() {
        let (program, args) = previewer_for("png", "/a.png", 100).unwrap();
        assert_eq!(program, "catimg");
        assert_eq!(args, vec!["-w", "200", "/a.png"]);

        let (program, args) = previewer_for("html", "/a.html", 80).unwrap();
        assert_eq!(program, "w3m");
        assert_eq!(args, vec!["-dump", "/a.html", "-cols", "80"]);

        assert_eq!(previewer_for("bib", "/r.bib", 80).unwrap().0, "bat");
        assert_eq!(previewer_for("pdf", "/p.pdf", 80).unwrap().1, vec!["/p.pdf", "-"]);
        assert!(previewer_for("xopp", "/x.xopp", 80).is_none());
    }
}
