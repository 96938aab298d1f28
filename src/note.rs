use crate::host::{MetadataSource, NoteFile};
use regex::Regex;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fs;
use std::path::{Component, Path, PathBuf};
use std::sync::OnceLock;

#[derive(Debug, thiserror::Error)]
pub enum NoteError {
    #[error("failed to read note '{}': {}", .path.display(), .source)]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

fn frontmatter_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Leading `---` line, then everything up to the next `---` line.
        Regex::new(r"(?ms)\A---[ \t]*\r?\n(.*?)^---[ \t]*\r?$")
            .expect("frontmatter regex is valid")
    })
}

/// Parse the YAML frontmatter block at the top of a note.
///
/// Returns an empty map when the note has no frontmatter or the block is not
/// a YAML mapping. Entries with non-string keys are skipped.
pub fn parse_frontmatter(text: &str) -> Map<String, Value> {
    let mut fields = Map::new();
    let Some(caps) = frontmatter_regex().captures(text) else {
        return fields;
    };
    let yaml = caps.get(1).map_or("", |m| m.as_str());
    if yaml.trim().is_empty() {
        return fields;
    }

    let mapping: serde_yaml::Mapping = match serde_yaml::from_str(yaml) {
        Ok(m) => m,
        Err(e) => {
            tracing::debug!(error = %e, "frontmatter is not a YAML mapping; ignoring");
            return fields;
        }
    };

    for (key, value) in mapping {
        let Some(key) = key.as_str() else {
            continue;
        };
        match serde_json::to_value(&value) {
            Ok(v) => {
                fields.insert(key.to_string(), v);
            }
            Err(e) => {
                tracing::debug!(key, error = %e, "frontmatter value has no JSON form; skipping")
            }
        }
    }
    fields
}

/// A directory of notes plus the frontmatter of the ones opened so far.
#[derive(Debug, Default)]
pub struct Vault {
    root: PathBuf,
    frontmatter: HashMap<String, Map<String, Value>>,
}

impl Vault {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            frontmatter: HashMap::new(),
        }
    }

    /// Read a note from disk and cache its frontmatter.
    ///
    /// Relative paths are taken relative to the vault root. Non-markdown
    /// files are not read; they are returned as-is so the caller can ignore
    /// them.
    pub fn open_note(&mut self, path: &Path) -> Result<NoteFile, NoteError> {
        let full = if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.root.join(path)
        };
        let note = NoteFile::new(self.vault_path(&full));
        if !note.is_markdown() {
            return Ok(note);
        }

        let text = fs::read_to_string(&full).map_err(|source| NoteError::Read {
            path: full.clone(),
            source,
        })?;
        self.insert(&note, parse_frontmatter(&text));
        Ok(note)
    }

    /// Register frontmatter for a note without touching the filesystem.
    pub fn insert(&mut self, note: &NoteFile, fields: Map<String, Value>) {
        self.frontmatter.insert(note.path.clone(), fields);
    }

    /// Vault-relative, `/`-separated form of `full`.
    ///
    /// Both sides are made absolute before comparing, so a relative root
    /// such as `.` still matches absolute note paths. Paths outside the root
    /// keep their full form.
    fn vault_path(&self, full: &Path) -> String {
        let root = absolute(&self.root);
        let full_abs = absolute(full);
        let canonical = fs::canonicalize(&root)
            .ok()
            .zip(fs::canonicalize(&full_abs).ok());

        let relative = canonical
            .as_ref()
            .and_then(|(root, full)| full.strip_prefix(root).ok())
            .or_else(|| full_abs.strip_prefix(&root).ok())
            .unwrap_or(full);
        let parts: Vec<String> = relative
            .components()
            .filter_map(|c| match c {
                Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
                Component::CurDir => None,
                Component::ParentDir => Some("..".to_string()),
                Component::RootDir | Component::Prefix(_) => None,
            })
            .collect();
        parts.join("/")
    }
}

fn absolute(path: &Path) -> PathBuf {
    if path.is_absolute() {
        return path.to_path_buf();
    }
    match std::env::current_dir() {
        Ok(cwd) => cwd.join(path),
        Err(_) => path.to_path_buf(),
    }
}

impl MetadataSource for Vault {
    fn frontmatter_value(&self, file: &NoteFile, key: &str) -> Option<Value> {
        self.frontmatter.get(&file.path)?.get(key).cloned()
    }
}
