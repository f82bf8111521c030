//! Note directories and their `.z/z.yml` metadata.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

/// Name of the metadata directory inside a note.
pub const META_DIR: &str = ".z";
/// Name of the metadata file inside [`META_DIR`].
pub const META_FILE: &str = "z.yml";

/// Note metadata errors.
#[derive(Debug, Error)]
pub enum NoteError {
    #[error("expected the note directory containing .z/z.yml, not '{}'", path.display())]
    NotANoteDir { path: PathBuf },

    #[error("unable to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unable to parse '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("unable to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("unknown Z-type '{0}'")]
    UnknownType(String),
}

/// Metadata of a note directory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ZMeta {
    /// Shell snippet that opens the note.
    pub open: String,
    /// Shell snippet run in the background while the note is open.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub view: String,
    /// Post-processing shell snippets, run in order.
    pub post: Vec<String>,
    pub sources: Vec<String>,
    pub objects: Vec<String>,
}

impl ZMeta {
    /// Path of the metadata file for a note directory.
    pub fn path_in(dir: &Path) -> PathBuf {
        dir.join(META_DIR).join(META_FILE)
    }

    /// Read the metadata of the note directory `dir`.
    pub fn read(dir: impl AsRef<Path>) -> Result<Self, NoteError> {
        let dir = dir.as_ref();
        let base = dir.file_name().and_then(|n| n.to_str());
        if matches!(base, Some(META_DIR) | Some(META_FILE)) {
            return Err(NoteError::NotANoteDir {
                path: dir.to_path_buf(),
            });
        }

        let path = Self::path_in(dir);
        let contents = std::fs::read_to_string(&path).map_err(|source| NoteError::Read {
            path: path.clone(),
            source,
        })?;

        if contents.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(&contents).map_err(|source| NoteError::Parse { path, source })
    }

    /// Write the metadata into `dir/.z/z.yml`, creating `.z`.
    pub fn write(&self, dir: impl AsRef<Path>) -> Result<PathBuf, NoteError> {
        let meta_dir = dir.as_ref().join(META_DIR);
        std::fs::create_dir_all(&meta_dir).map_err(|source| NoteError::Write {
            path: meta_dir.clone(),
            source,
        })?;

        let path = meta_dir.join(META_FILE);
        let yaml = serde_yaml::to_string(self).map_err(|source| NoteError::Parse {
            path: path.clone(),
            source,
        })?;
        std::fs::write(&path, yaml).map_err(|source| NoteError::Write {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Classify a file of this note by its name.
    pub fn classify(&self, file_name: &str) -> ZType {
        if self.sources.iter().any(|s| s == file_name) {
            ZType::Source
        } else if self.objects.iter().any(|o| o == file_name) {
            ZType::Object
        } else {
            ZType::File
        }
    }
}

/// Whether `dir` is a note directory.
pub fn is_note_dir(dir: impl AsRef<Path>) -> bool {
    dir.as_ref().join(META_DIR).exists()
}

/// Classification of an entry in a K.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ZType {
    /// A note directory (`Z`).
    Note,
    /// A plain directory (`D`).
    Dir,
    /// A plain file (`F`).
    File,
    /// A source file of a note (`S`).
    Source,
    /// An object file of a note (`O`).
    Object,
}

impl ZType {
    pub const ALL: [ZType; 5] = [
        ZType::Note,
        ZType::Dir,
        ZType::File,
        ZType::Source,
        ZType::Object,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ZType::Note => "Z",
            ZType::Dir => "D",
            ZType::File => "F",
            ZType::Source => "S",
            ZType::Object => "O",
        }
    }
}

impl fmt::Display for ZType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ZType {
    type Err = NoteError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Z" => Ok(ZType::Note),
            "D" => Ok(ZType::Dir),
            "F" => Ok(ZType::File),
            "S" => Ok(ZType::Source),
            "O" => Ok(ZType::Object),
            other => Err(NoteError::UnknownType(other.to_string())),
        }
    }
}
