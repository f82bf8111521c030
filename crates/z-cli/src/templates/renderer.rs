//! Template rendering with variable substitution.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use z_common_config::{Blueprint, ZMeta};

use crate::templates::{TemplateContext, TemplateError};

fn variable_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        // {{.Name}}, {{ .K.Path }}, {{Today}}
        Regex::new(r"\{\{\s*\.?([A-Za-z_][A-Za-z0-9_.]*)\s*\}\}").expect("static pattern")
    })
}

/// Template renderer
pub struct TemplateRenderer<'a> {
    context: &'a TemplateContext,
}

impl<'a> TemplateRenderer<'a> {
    pub fn new(context: &'a TemplateContext) -> Self {
        Self { context }
    }

    /// Render a string with variable substitution
    pub fn render_string(&self, template: &str) -> Result<String, TemplateError> {
        let mut missing = Vec::new();

        let rendered = variable_pattern().replace_all(template, |cap: &Captures<'_>| {
            match self.context.get(&cap[1]) {
                Some(value) => value.clone(),
                None => {
                    missing.push(cap[1].to_string());
                    String::new()
                }
            }
        });

        if !missing.is_empty() {
            return Err(TemplateError::MissingVariable(missing.join(", ")));
        }

        Ok(rendered.into_owned())
    }

    /// Render every template of a blueprint
    ///
    /// File paths are relative to the K; with a non-empty subdir they are
    /// prefixed with the rendered subdir.
    pub fn render_blueprint(&self, blueprint: &Blueprint) -> Result<RenderedNote, TemplateError> {
        let subdir = self.render_string(&blueprint.subdir)?;

        let mut files = Vec::with_capacity(blueprint.templates.len());
        for (path_template, content_template) in &blueprint.templates {
            let rendered_path = self.render_string(path_template)?;
            let path = if subdir.is_empty() {
                PathBuf::from(rendered_path)
            } else {
                Path::new(&subdir).join(rendered_path)
            };

            files.push(RenderedFile {
                path,
                content: self.render_string(content_template)?,
            });
        }

        let meta = ZMeta {
            open: self.render_string(&blueprint.open)?,
            view: self.render_string(&blueprint.view)?,
            post: blueprint
                .post
                .iter()
                .map(|p| self.render_string(p))
                .collect::<Result<_, _>>()?,
            sources: blueprint.sources.clone(),
            objects: blueprint.objects.clone(),
        };

        let subdir = (!subdir.is_empty()).then(|| PathBuf::from(subdir));
        Ok(RenderedNote {
            subdir,
            files,
            meta,
        })
    }
}

/// A blueprint rendered for one note
#[derive(Debug)]
pub struct RenderedNote {
    /// Rendered subdir, `None` when the blueprint has none
    pub subdir: Option<PathBuf>,
    /// Files relative to the K root
    pub files: Vec<RenderedFile>,
    /// Rendered open/view/post snippets and the blueprint's file lists
    pub meta: ZMeta,
}

impl RenderedNote {
    /// The note directory, relative to the K root
    ///
    /// The rendered subdir if there is one, else the directory of the first
    /// nested file. `None` when every file sits directly in the K root.
    pub fn note_dir(&self) -> Option<PathBuf> {
        self.subdir
            .clone()
            .or_else(|| self.files.iter().find_map(|f| f.note_dir()))
    }
}

/// A rendered file ready to be written
#[derive(Debug)]
pub struct RenderedFile {
    /// Path relative to the K root
    pub path: PathBuf,
    pub content: String,
}

impl RenderedFile {
    /// Directory of the file relative to the K root, `None` in the root
    pub fn note_dir(&self) -> Option<PathBuf> {
        let parent = self.path.parent()?;
        if parent.as_os_str().is_empty() {
            None
        } else {
            Some(parent.to_path_buf())
        }
    }

    /// Write the file below `root`, creating parent directories
    pub fn write(&self, root: &Path) -> Result<PathBuf, TemplateError> {
        let target = root.join(&self.path);

        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&target, &self.content)?;
        Ok(target)
    }
}
