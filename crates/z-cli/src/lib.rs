//! z CLI library
//!
//! Command tree, command handlers and helpers for the `z` binary.

pub mod catalog;
pub mod cli;
pub mod commands;
pub mod error;
pub mod process;
pub mod prompts;
pub mod templates;

pub use error::CliError;
