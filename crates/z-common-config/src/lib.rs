//! Configuration types for z.
//!
//! This crate provides the types for `~/.config/z.yml` (Ks, blueprints,
//! settings) and for the `.z/z.yml` metadata of note directories.

pub mod env;
pub mod loader;
pub mod note;
pub mod types;


pub use env::expand_env_vars;
pub use loader::*;
pub use note::{is_note_dir, NoteError, ZMeta, ZType};
pub use types::*;
