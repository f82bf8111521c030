//! Configuration file loading and parsing.

use crate::env::expand_env_vars;
use crate::types::{Blueprint, Settings, ZConfig, K};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Location of the config file below the home directory.
pub const CONFIG_RELATIVE_PATH: &str = ".config/z.yml";

/// Config loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not determine user home directory")]
    NoHomeDir,

    #[error("failed to access config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid YAML in {path} at line {}: {message}", line.map(|l| l.to_string()).unwrap_or_else(|| "unknown".to_string()))]
    ParseError {
        path: PathBuf,
        line: Option<usize>,
        message: String,
    },

    #[error("validation error: {message}")]
    ValidationError { message: String },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] serde_yaml::Error),
}

/// How the config file was found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Parsed from the file.
    Loaded,
    /// No file at the path; an empty config is used.
    Missing,
    /// The file exists but could not be read; an empty config is used.
    Unreadable(String),
}

/// Result of loading the config file.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub config: ZConfig,
    pub path: PathBuf,
    pub source: ConfigSource,
}

/// Configuration loader.
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    path: PathBuf,
}

impl ConfigLoader {
    /// Create a loader for an explicit config file.
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a loader for `~/.config/z.yml`.
    pub fn from_home() -> Result<Self, ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        Ok(Self::new(home.join(CONFIG_RELATIVE_PATH)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether the config file exists.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Load the config file.
    ///
    /// A missing or unreadable file yields an empty config; the outcome says
    /// which happened so the caller can report it.
    pub fn load(&self) -> Result<LoadOutcome, ConfigError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(e) => {
                let source = if e.kind() == std::io::ErrorKind::NotFound {
                    ConfigSource::Missing
                } else {
                    ConfigSource::Unreadable(e.to_string())
                };
                return Ok(LoadOutcome {
                    config: ZConfig::default(),
                    path: self.path.clone(),
                    source,
                });
            }
        };

        let config = self.parse(&contents)?;
        Ok(LoadOutcome {
            config,
            path: self.path.clone(),
            source: ConfigSource::Loaded,
        })
    }

    /// Parse, expand and validate config contents.
    pub fn parse(&self, contents: &str) -> Result<ZConfig, ConfigError> {
        // An empty document deserializes to unit, not to the default struct.
        if contents.trim().is_empty() {
            return Ok(ZConfig::default());
        }

        let mut config: ZConfig =
            serde_yaml::from_str(contents).map_err(|e| ConfigError::ParseError {
                path: self.path.clone(),
                line: e.location().map(|l| l.line()),
                message: e.to_string(),
            })?;

        for k in config.ks.values_mut() {
            k.path = expand_env_vars(&k.path);
            k.url = expand_env_vars(&k.url);
        }

        self.validate(&config)?;
        Ok(config)
    }

    fn validate(&self, config: &ZConfig) -> Result<(), ConfigError> {
        for (id, k) in &config.ks {
            if k.path.trim().is_empty() {
                return Err(ConfigError::ValidationError {
                    message: format!("K '{id}' has no path"),
                });
            }
        }
        Ok(())
    }

    /// Write the starter config, creating the parent directory.
    pub fn write_boilerplate(&self) -> Result<(), ConfigError> {
        let home = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        let config = boilerplate_config(&home);
        let yaml = serde_yaml::to_string(&config)?;

        if let Some(dir) = self.path.parent() {
            std::fs::create_dir_all(dir).map_err(|source| ConfigError::Io {
                path: dir.to_path_buf(),
                source,
            })?;
        }

        std::fs::write(&self.path, format!("{BOILERPLATE_HEADER}\n{yaml}")).map_err(|source| {
            ConfigError::Io {
                path: self.path.clone(),
                source,
            }
        })
    }
}

const BOILERPLATE_HEADER: &str = "\
# z configuration file
#
# Settings are application-wide settings:
#   color: Enable colored output in logs (default: true, set to false to disable)
#   verbosity-level: Log verbosity level - trace, debug, info, warn, error, fatal, panic (default: info)
#   default-blueprint: Blueprint used by 'z create' when none is given (optional)
#
# Ks are knowledge bases - directories containing your notes
# Each K can be:
#   - Remote: Has a 'url' field, will be cloned and synced via git
#   - Local: No 'url' field, managed locally only
#
# Example remote K:
#   work:
#     path: ~/notes/work
#     url: git@github.com:user/work-notes.git
#
# Blueprints are templates for creating new notes
";

/// The config written by `z init` when none exists.
pub fn boilerplate_config(home: &Path) -> ZConfig {
    let misc_path = home.join("notes").join("misc");

    let mut templates = BTreeMap::new();
    templates.insert(
        "note.md".to_string(),
        "# {{.Name}}\n\nCreated: {{.Today}}\n\n".to_string(),
    );

    let mut ks = BTreeMap::new();
    ks.insert(
        "misc".to_string(),
        K::new(misc_path.to_string_lossy(), ""),
    );

    let mut blueprints = BTreeMap::new();
    blueprints.insert(
        "note".to_string(),
        Blueprint {
            subdir: "{{.Name}}".to_string(),
            templates,
            open: "nvim note.md".to_string(),
            sources: vec!["note.md".to_string()],
            ..Default::default()
        },
    );

    ZConfig {
        settings: Settings {
            color: Some(true),
            verbosity_level: "info".to_string(),
            default_blueprint: None,
        },
        ks,
        blueprints,
    }
}
