//! CLI error handling.

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use thiserror::Error;

use crate::process::ProcessError;
use crate::prompts::PromptError;
use crate::templates::TemplateError;

/// CLI error type with context for the final report
#[derive(Debug, Error)]
pub enum CliError {
    #[error("{message}")]
    Config {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
        hint: Option<String>,
    },

    #[error("{message}")]
    Io {
        message: String,
        #[source]
        source: io::Error,
        path: Option<PathBuf>,
    },

    #[error("{message}")]
    Validation { message: String, hint: Option<String> },

    #[error("{message}")]
    NotFound {
        message: String,
        resource_type: String,
        resource_name: String,
        suggestions: Vec<String>,
    },

    #[error("{message}")]
    Command {
        message: String,
        command: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    #[error("{message}")]
    User { message: String, hint: Option<String> },

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }

    /// Numeric exit code for this error
    pub fn code(&self) -> u8 {
        match self {
            Self::Config { .. } => 2,
            Self::Io { .. } => 3,
            Self::Validation { .. } => 5,
            Self::NotFound { .. } => 6,
            Self::Command { .. } => 8,
            Self::User { .. } => 1,
            Self::Other(_) => 1,
        }
    }

    /// Get hint for this error if available
    pub fn hint(&self) -> Option<&str> {
        match self {
            Self::Config { hint, .. }
            | Self::Validation { hint, .. }
            | Self::User { hint, .. } => hint.as_deref(),
            _ => None,
        }
    }

    /// Get suggestions for this error
    pub fn suggestions(&self) -> &[String] {
        match self {
            Self::NotFound { suggestions, .. } => suggestions,
            _ => &[],
        }
    }

    /// Create a config error with hint
    pub fn config_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
            source: None,
            hint: Some(hint.into()),
        }
    }

    /// Create an IO error with path
    pub fn io_with_path(
        message: impl Into<String>,
        source: io::Error,
        path: impl Into<PathBuf>,
    ) -> Self {
        Self::Io {
            message: message.into(),
            source,
            path: Some(path.into()),
        }
    }

    /// Create a not found error with suggestions
    pub fn not_found_with_suggestions(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        suggestions: Vec<String>,
    ) -> Self {
        let resource_type = resource_type.into();
        let resource_name = resource_name.into();
        Self::NotFound {
            message: format!("no such {resource_type} '{resource_name}'"),
            resource_type,
            resource_name,
            suggestions,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            hint: None,
        }
    }

    /// Create a validation error with hint
    pub fn validation_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }

    /// Create a command error from a failed external program
    pub fn command(message: impl Into<String>, source: ProcessError) -> Self {
        Self::Command {
            message: message.into(),
            command: source.command().to_string(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a user error (user did something wrong)
    pub fn user(message: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
            hint: None,
        }
    }

    /// Create a user error with hint
    pub fn user_with_hint(message: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::User {
            message: message.into(),
            hint: Some(hint.into()),
        }
    }
}

// Conversion implementations
impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        Self::Io {
            message: err.to_string(),
            source: err,
            path: None,
        }
    }
}

impl From<z_common_config::ConfigError> for CliError {
    fn from(err: z_common_config::ConfigError) -> Self {
        Self::Config {
            message: format!("configuration error: {err}"),
            source: Some(Box::new(err)),
            hint: Some("check ~/.config/z.yml or run `z init`".to_string()),
        }
    }
}

impl From<z_common_config::NoteError> for CliError {
    fn from(err: z_common_config::NoteError) -> Self {
        match err {
            z_common_config::NoteError::UnknownType(_) => Self::validation(err.to_string()),
            other => Self::Config {
                message: other.to_string(),
                source: Some(Box::new(other)),
                hint: None,
            },
        }
    }
}

impl From<TemplateError> for CliError {
    fn from(err: TemplateError) -> Self {
        match err {
            TemplateError::Io(source) => Self::from(source),
            other => Self::Validation {
                message: other.to_string(),
                hint: Some("placeholders are {{.Name}}, {{.Today}}, {{.Now}}, {{.K.Path}} and {{.K.URL}}".to_string()),
            },
        }
    }
}

impl From<PromptError> for CliError {
    fn from(err: PromptError) -> Self {
        match err {
            PromptError::Io(source) => Self::from(source),
            other => Self::user(other.to_string()),
        }
    }
}

impl From<z_git::GitError> for CliError {
    fn from(err: z_git::GitError) -> Self {
        Self::Other(anyhow::Error::new(err))
    }
}
