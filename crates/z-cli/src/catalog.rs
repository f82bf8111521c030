//! Enumeration of all files in all Ks.
//!
//! The catalog is one line per entry with tab-separated columns. With the
//! default columns (K, file, type) a line is exactly what `open` and
//! `preview` take as arguments.

use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::warn;
use z_common_config::{is_note_dir, ZConfig, ZMeta, ZType};

use crate::error::CliError;

/// Columns written for each entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub k: bool,
    pub file_name: bool,
    pub file_type: bool,
    pub full_path: bool,
}

impl Columns {
    /// K, file and type: the entry line format.
    pub const ENTRY: Columns = Columns {
        k: true,
        file_name: true,
        file_type: true,
        full_path: false,
    };

    /// Whether any column is enabled.
    pub fn any(&self) -> bool {
        self.k || self.file_name || self.file_type || self.full_path
    }
}

/// One file or note in a K.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Entry {
    pub k: String,
    /// Path relative to the K root.
    pub file: String,
    pub ztype: ZType,
    pub full_path: PathBuf,
}

impl Entry {
    fn new(k: &str, k_root: &Path, file: String, ztype: ZType) -> Self {
        Self {
            k: k.to_string(),
            full_path: k_root.join(&file),
            file,
            ztype,
        }
    }

    /// The entry as a line with the enabled columns.
    pub fn line(&self, columns: Columns) -> String {
        let mut parts: Vec<String> = Vec::with_capacity(4);
        if columns.k {
            parts.push(self.k.clone());
        }
        if columns.file_name {
            parts.push(self.file.clone());
        }
        if columns.file_type {
            parts.push(self.ztype.to_string());
        }
        if columns.full_path {
            parts.push(self.full_path.display().to_string());
        }
        parts.join("\t")
    }
}

fn is_hidden(name: &str) -> bool {
    name.starts_with('.')
}

/// Non-hidden entries of a directory, sorted by name, with whether each is
/// a directory itself. Symlinks are not followed.
fn visible_entries(dir: &Path) -> std::io::Result<Vec<(String, bool)>> {
    let mut entries = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let name = entry.file_name().to_string_lossy().into_owned();
        if !is_hidden(&name) {
            entries.push((name, entry.file_type()?.is_dir()));
        }
    }
    entries.sort();
    Ok(entries)
}

fn join(dir: &str, name: &str) -> String {
    format!("{dir}/{name}")
}

/// All entries of one K.
pub fn k_entries(k_id: &str, k_root: &Path) -> Result<Vec<Entry>, CliError> {
    let names = visible_entries(k_root).map_err(|source| {
        CliError::io_with_path(
            format!("unable to read dir '{}' for K '{k_id}'", k_root.display()),
            source,
            k_root,
        )
    })?;

    let mut entries = Vec::new();
    for (name, is_dir) in names {
        let path = k_root.join(&name);
        if !is_dir {
            entries.push(Entry::new(k_id, k_root, name, ZType::File));
            continue;
        }

        if is_note_dir(&path) {
            let meta = ZMeta::read(&path)?;
            entries.push(Entry::new(k_id, k_root, name.clone(), ZType::Note));
            for source in &meta.sources {
                entries.push(Entry::new(k_id, k_root, join(&name, source), ZType::Source));
            }
            for object in &meta.objects {
                entries.push(Entry::new(k_id, k_root, join(&name, object), ZType::Object));
            }
            continue;
        }

        match visible_entries(&path) {
            Ok(children) => {
                for (child, _) in children {
                    entries.push(Entry::new(k_id, k_root, join(&name, &child), ZType::File));
                }
            }
            Err(e) => warn!(dir = %path.display(), error = %e, "could not open dir for reading"),
        }
    }

    Ok(entries)
}

/// Write the catalog of every K, sorted by K id.
pub fn write_catalog<W: Write>(config: &ZConfig, columns: Columns, out: &mut W) -> Result<(), CliError> {
    for (id, k) in &config.ks {
        for entry in k_entries(id, Path::new(&k.path))? {
            writeln!(out, "{}", entry.line(columns))?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use z_common_config::K;

    fn fixture() -> tempfile::TempDir {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();

        fs::write(root.join("todo.md"), "").unwrap();
        fs::write(root.join(".hidden"), "").unwrap();

        fs::create_dir(root.join("paper")).unwrap();
        ZMeta {
            open: "nvim paper.tex".into(),
            sources: vec!["paper.tex".into()],
            objects: vec!["paper.pdf".into()],
            ..ZMeta::default()
        }
        .write(root.join("paper"))
        .unwrap();

        fs::create_dir_all(root.join("assets/deeper")).unwrap();
        fs::write(root.join("assets/logo.png"), "").unwrap();
        fs::write(root.join("assets/.cache"), "").unwrap();
        fs::write(root.join("assets/deeper/ignored.txt"), "").unwrap();

        dir
    }

    #[test]
    fn test_k_entries() {
        let dir = fixture();
        let entries = k_entries("work", dir.path()).unwrap();
        let lines: Vec<_> = entries.iter().map(|e| e.line(Columns::ENTRY)).collect();

        assert_eq!(
            lines,
            vec![
                "work\tassets/deeper\tF",
                "work\tassets/logo.png\tF",
                "work\tpaper\tZ",
                "work\tpaper/paper.tex\tS",
                "work\tpaper/paper.pdf\tO",
                "work\ttodo.md\tF",
            ]
        );
        assert_eq!(entries[2].full_path, dir.path().join("paper"));
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinked_dir_is_a_file_entry() {
        let dir = fixture();
        let outside = tempfile::tempdir().unwrap();
        fs::write(outside.path().join("inner.md"), "").unwrap();
        std::os::unix::fs::symlink(outside.path(), dir.path().join("linked")).unwrap();

        let entries = k_entries("work", dir.path()).unwrap();
        let lines: Vec<_> = entries.iter().map(|e| e.line(Columns::ENTRY)).collect();
        assert!(lines.contains(&"work\tlinked\tF".to_string()));
        assert!(!lines.iter().any(|l| l.contains("inner.md")));
    }

    #[test]
    fn test_columns_select_fields() {
        let entry = Entry::new("work", Path::new("/n/work"), "a.md".into(), ZType::File);
        let cols = Columns {
            k: false,
            file_name: true,
            file_type: false,
            full_path: true,
        };
        assert_eq!(entry.line(cols), "a.md\t/n/work/a.md");
        assert!(cols.any());
        assert!(!Columns {
            k: false,
            file_name: false,
            file_type: false,
            full_path: false
        }
        .any());
    }

    #[test]
    fn test_unreadable_k_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing");
        let err = k_entries("ghost", &missing).unwrap_err();
        assert!(err.to_string().starts_with("unable to read dir"));
        assert!(err.to_string().ends_with("for K 'ghost'"));
    }

    #[test]
    fn test_broken_note_meta_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("broken/.z")).unwrap();
        fs::write(dir.path().join("broken/.z/z.yml"), "post: [unclosed").unwrap();
        assert!(k_entries("k", dir.path()).is_err());
    }

    #[test]
    fn test_write_catalog_sorted_by_k() {
        let a = fixture();
        let b = tempfile::tempdir().unwrap();
        fs::write(b.path().join("only.txt"), "").unwrap();

        let mut config = ZConfig::default();
        config.ks.insert("zeta".into(), K::new(a.path().to_string_lossy(), ""));
        config.ks.insert("alpha".into(), K::new(b.path().to_string_lossy(), ""));

        let mut out = Vec::new();
        write_catalog(&config, Columns::ENTRY, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let first = text.lines().next().unwrap();
        assert_eq!(first, "alpha\tonly.txt\tF");
        assert_eq!(text.lines().count(), 7);
    }
}
