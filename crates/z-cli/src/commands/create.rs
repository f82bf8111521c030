//! Create command implementation.

use std::io::ErrorKind;
use std::path::Path;

use clap::Parser;
use tracing::{debug, info};

use crate::cli::CommandContext;
use crate::error::CliError;
use crate::process;
use crate::templates::{RenderedNote, TemplateContext, TemplateError, TemplateRenderer};

/// Create a new note or file from a blueprint
#[derive(Debug, Parser)]
pub struct CreateCommand {
    /// The K to create the note in
    pub k: String,

    /// Name of the note, available as {{.Name}} in templates
    pub name: String,

    /// Blueprint to use [default: settings.default-blueprint]
    pub blueprint: Option<String>,
}

fn exists(path: &Path) -> bool {
    match std::fs::symlink_metadata(path) {
        Ok(_) => true,
        Err(e) => e.kind() != ErrorKind::NotFound,
    }
}

/// Check rendered files against the K before anything is written.
fn check_files(k_root: &Path, blueprint_id: &str, note: &RenderedNote) -> Result<(), CliError> {
    for file in &note.files {
        let shown = file.path.display();
        if file.path.is_absolute() {
            return Err(CliError::user_with_hint(
                format!("the resolved path '{shown}' appears absolute"),
                "use relative paths instead",
            ));
        }
        if exists(&k_root.join(&file.path)) {
            return Err(CliError::user(format!(
                "the file '{shown}' seems to already exist"
            )));
        }
        if file.note_dir().is_some() {
            continue;
        }

        if note.files.len() > 1 {
            return Err(CliError::validation_with_hint(
                format!(
                    "blueprint '{blueprint_id}' would create multiple files even though '{shown}' does not use a subdir"
                ),
                "use a subdir or only create one file",
            ));
        }
        let Some(stem) = file.path.file_stem().filter(|_| file.path.extension().is_some()) else {
            return Err(CliError::validation(format!(
                "the resolved file path '{shown}' seems to lack an extension"
            )));
        };
        let dir = k_root.join(stem);
        if exists(&dir) {
            return Err(CliError::user(format!(
                "it seems a dir '{}' already exists, so not allowing file '{}'",
                dir.display(),
                k_root.join(&file.path).display()
            )));
        }
    }
    Ok(())
}

impl CreateCommand {
    pub async fn execute(&self, ctx: &CommandContext) -> Result<(), CliError> {
        let k = ctx.k(&self.k)?;
        let k_root = Path::new(&k.path);

        let blueprint_id = self
            .blueprint
            .as_deref()
            .or(ctx.config.settings.default_blueprint.as_deref())
            .ok_or_else(|| {
                CliError::validation_with_hint(
                    "no blueprint given",
                    "pass a blueprint or set settings.default-blueprint",
                )
            })?;
        let blueprint = ctx.config.blueprint(blueprint_id).ok_or_else(|| {
            CliError::not_found_with_suggestions(
                "blueprint",
                blueprint_id,
                ctx.config.blueprint_ids().map(str::to_string).collect(),
            )
        })?;
        if blueprint.open.is_empty() {
            return Err(CliError::validation(format!(
                "the open command is missing from blueprint '{blueprint_id}'"
            )));
        }

        let template_ctx = TemplateContext::for_note(&self.name, k);
        let note = TemplateRenderer::new(&template_ctx).render_blueprint(blueprint)?;
        check_files(k_root, blueprint_id, &note)?;

        for file in &note.files {
            let written = file.write(k_root).map_err(|e| match e {
                TemplateError::Io(source) => CliError::io_with_path(
                    format!("could not write file '{}'", file.path.display()),
                    source,
                    k_root.join(&file.path),
                ),
                other => other.into(),
            })?;
            info!(file = %written.display(), "successfully populated file");
        }

        let open_dir = match note.note_dir() {
            Some(dir) => {
                let dir = k_root.join(dir);
                let meta_path = note.meta.write(&dir)?;
                debug!(path = %meta_path.display(), "wrote note metadata");
                dir
            }
            None => k_root.to_path_buf(),
        };

        process::run_shell(&open_dir, &note.meta.open)
            .await
            .map_err(|e| CliError::command("error running open command", e))
    }
}
