//! Configuration types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration, read from `~/.config/z.yml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZConfig {
    /// Application-wide settings.
    pub settings: Settings,
    /// Knowledge bases by id.
    #[serde(rename = "Ks")]
    pub ks: BTreeMap<String, K>,
    /// Blueprints by id.
    pub blueprints: BTreeMap<String, Blueprint>,
}

impl ZConfig {
    /// Look up a K by id.
    pub fn k(&self, id: &str) -> Option<&K> {
        self.ks.get(id)
    }

    /// Look up a blueprint by id.
    pub fn blueprint(&self, id: &str) -> Option<&Blueprint> {
        self.blueprints.get(id)
    }

    /// Ids of all configured Ks, sorted.
    pub fn k_ids(&self) -> impl Iterator<Item = &str> {
        self.ks.keys().map(String::as_str)
    }

    /// Ids of all configured blueprints, sorted.
    pub fn blueprint_ids(&self) -> impl Iterator<Item = &str> {
        self.blueprints.keys().map(String::as_str)
    }
}

/// Application-wide settings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct Settings {
    /// Colored log output. Unset means enabled.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<bool>,
    /// Log verbosity (trace, debug, info, warn, error, fatal, panic).
    #[serde(skip_serializing_if = "String::is_empty")]
    pub verbosity_level: String,
    /// Blueprint used by `create` when none is given.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_blueprint: Option<String>,
}

impl Settings {
    /// Whether colored output is enabled.
    pub fn color_enabled(&self) -> bool {
        self.color.unwrap_or(true)
    }
}

/// A single knowledge base ("Kasten"), a directory of notes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct K {
    /// Directory holding the notes.
    pub path: String,
    /// Git remote. Empty means the K is synced manually.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub url: String,
}

impl K {
    pub fn new(path: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            url: url.into(),
        }
    }

    /// Whether the K is backed by a git remote.
    pub fn is_remote(&self) -> bool {
        !self.url.is_empty()
    }
}

/// A template for a new note.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blueprint {
    /// Directory (template) the files are created in, relative to the K.
    pub subdir: String,
    /// File path template -> content template.
    pub templates: BTreeMap<String, String>,
    /// Shell snippet that opens the new note.
    pub open: String,
    /// Shell snippet run in the background while the note is open.
    pub view: String,
    /// Post-processing shell snippets.
    pub post: Vec<String>,
    /// Source files of the note.
    pub sources: Vec<String>,
    /// Object (generated) files of the note.
    pub objects: Vec<String>,
}
