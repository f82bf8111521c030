//! CLI argument definitions using clap derive macros.

use std::path::{Path, PathBuf};

use clap::{ArgAction, ColorChoice, Parser, Subcommand, ValueHint};
use z_common_config::{ConfigLoader, ZConfig, K};

use crate::commands::{
    CompleteCommand, CreateCommand, EnumerateFilesCommand, FindCommand, InitCommand, MakeCommand,
    OpenCommand, PreviewCommand, SyncCommand, VersionCommand,
};
use crate::error::CliError;

/// z - a git-centric note management system
///
/// Notes live in knowledge bases (Ks), directories that are usually git
/// repositories. Ks and blueprints for new notes are configured in
/// ~/.config/z.yml.
#[derive(Debug, Parser)]
#[command(
    name = "z",
    author,
    version,
    about,
    propagate_version = true,
    arg_required_else_help = true,
    help_template = "\
{before-help}{name} {version}
{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
"
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv)
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        global = true,
        help = "Increase verbosity level"
    )]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(
        short,
        long,
        global = true,
        conflicts_with = "verbose",
        help = "Suppress non-error log output"
    )]
    pub quiet: bool,

    /// Path to configuration file
    #[arg(
        short,
        long,
        global = true,
        env = "Z_CONFIG",
        value_hint = ValueHint::FilePath,
        help = "Path to configuration file [default: ~/.config/z.yml]"
    )]
    pub config: Option<PathBuf>,

    /// When to use colors
    #[arg(
        long,
        global = true,
        default_value = "auto",
        value_enum,
        help = "When to use colors in log output (auto follows settings.color)"
    )]
    pub color: ColorChoice,

    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Display version information
    Version(VersionCommand),

    /// Create the config if missing and set up all Ks (clone remote, init local)
    Init(InitCommand),

    /// Create a new note or file from a blueprint in a K
    #[command(visible_alias = "c")]
    Create(CreateCommand),

    /// Open a file or note with the appropriate program
    Open(OpenCommand),

    /// Preview an entry line in the terminal
    Preview(PreviewCommand),

    /// List all files across all Ks
    EnumerateFiles(EnumerateFilesCommand),

    /// Find notes by text content or file name
    #[command(visible_alias = "f")]
    Find(FindCommand),

    /// Sync all Ks: commit local changes, pull from remote and push
    #[command(visible_alias = "s")]
    Sync(SyncCommand),

    /// Run the post commands of a note's .z/z.yml
    #[command(visible_alias = "m")]
    Make(MakeCommand),

    /// Generate shell completions
    Completions(CompletionsCommand),

    /// Print context-aware completion candidates
    #[command(hide = true)]
    Complete(CompleteCommand),
}

/// Shell completions generation
#[derive(Debug, Parser)]
pub struct CompletionsCommand {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

impl Cli {
    /// The loader for the selected config file
    pub fn config_loader(&self) -> Result<ConfigLoader, CliError> {
        match &self.config {
            Some(path) => Ok(ConfigLoader::new(path)),
            None => ConfigLoader::from_home().map_err(CliError::from),
        }
    }

    /// Whether log output is colored, given the `settings.color` value
    pub fn color_enabled(&self, setting: bool) -> bool {
        match self.color {
            ColorChoice::Always => true,
            ColorChoice::Never => false,
            ColorChoice::Auto => setting,
        }
    }

    /// Execute the selected command
    pub async fn execute(self, ctx: CommandContext) -> Result<(), CliError> {
        match self.command {
            Command::Version(cmd) => cmd.execute(&ctx).await,
            Command::Init(cmd) => cmd.execute(ctx).await,
            Command::Create(cmd) => cmd.execute(&ctx).await,
            Command::Open(cmd) => cmd.execute(&ctx).await,
            Command::Preview(cmd) => cmd.execute(&ctx).await,
            Command::EnumerateFiles(cmd) => cmd.execute(&ctx).await,
            Command::Find(cmd) => cmd.execute(&ctx).await,
            Command::Sync(cmd) => cmd.execute(&ctx).await,
            Command::Make(cmd) => cmd.execute(&ctx).await,
            Command::Completions(cmd) => cmd.execute(&ctx),
            Command::Complete(cmd) => cmd.execute(&ctx).await,
        }
    }
}

impl CompletionsCommand {
    /// Execute the completions command
    pub fn execute(&self, _ctx: &CommandContext) -> Result<(), CliError> {
        use clap::CommandFactory;
        use clap_complete::generate;
        use std::io;

        let mut cmd = Cli::command();
        let name = cmd.get_name().to_string();
        generate(self.shell, &mut cmd, name, &mut io::stdout());
        Ok(())
    }
}

/// Context passed to all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: ZConfig,
    pub config_path: PathBuf,
}

impl CommandContext {
    /// Look up a K, suggesting the configured ids when it is unknown
    pub fn k(&self, id: &str) -> Result<&K, CliError> {
        self.config.k(id).ok_or_else(|| {
            CliError::not_found_with_suggestions(
                "K",
                id,
                self.config.k_ids().map(str::to_string).collect(),
            )
        })
    }

    /// Resolve `file` inside K `id` and check that it exists
    pub fn existing_file(&self, id: &str, file: &str) -> Result<PathBuf, CliError> {
        let k = self.k(id)?;
        let full_path = Path::new(&k.path).join(file);
        std::fs::metadata(&full_path).map_err(|source| {
            CliError::io_with_path(
                format!("file '{}' stat error ({source})", full_path.display()),
                source,
                &full_path,
            )
        })?;
        Ok(full_path)
    }
}
