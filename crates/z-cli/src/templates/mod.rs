//! Blueprint templates.
//!
//! Blueprints use Go-template-style placeholders such as `{{.Name}}`; only
//! plain variable substitution is supported.

mod renderer;

pub use renderer::{RenderedFile, RenderedNote, TemplateRenderer};

use std::collections::HashMap;

use thiserror::Error;
use z_common_config::K;

/// Template errors
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("unknown template variable(s): {0}")]
    MissingVariable(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Context for template rendering
#[derive(Debug, Clone, Default)]
pub struct TemplateContext {
    pub variables: HashMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.variables.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&String> {
        self.variables.get(key)
    }

    /// Context for a new note called `name` in `k`, stamped with the local time
    pub fn for_note(name: &str, k: &K) -> Self {
        let now = chrono::Local::now();
        let mut ctx = Self::new();

        ctx.set("Name", name);
        ctx.set("Today", now.format("%Y-%m-%d").to_string());
        ctx.set("Now", now.to_rfc3339());
        ctx.set("K.Path", &k.path);
        ctx.set("K.URL", &k.url);

        ctx
    }
}
