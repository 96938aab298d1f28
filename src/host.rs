//! Seams to the host application: the opened file, its metadata cache, and
//! the file-open notification.

use serde_json::Value;

/// A file the host reports as opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteFile {
    /// Vault-relative path with `/` separators, e.g. `Private/secret.md`.
    pub path: String,
    /// Extension without the dot, e.g. `md`.
    pub extension: String,
}

impl NoteFile {
    /// Build from a vault-relative path, taking the extension from the
    /// final path component.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or(&path);
        let extension = match name.rfind('.') {
            Some(idx) if idx > 0 => name[idx + 1..].to_string(),
            _ => String::new(),
        };
        Self { path, extension }
    }

    pub fn is_markdown(&self) -> bool {
        self.extension == "md"
    }
}

/// The host's parsed-frontmatter cache.
pub trait MetadataSource {
    /// Value stored under `key` in the note's frontmatter, if any.
    fn frontmatter_value(&self, file: &NoteFile, key: &str) -> Option<Value>;
}

/// Receives the host's file-open notifications.
pub trait FileOpenListener {
    /// `file` is `None` when the host closes the last view.
    fn on_file_open(&mut self, file: Option<&NoteFile>);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_from_last_component() {
        assert_eq!(NoteFile::new("Private/secret.md").extension, "md");
        assert_eq!(NoteFile::new("a.b/c").extension, "");
        assert_eq!(NoteFile::new("archive.tar.gz").extension, "gz");
        assert_eq!(NoteFile::new("notes/.hidden").extension, "");
    }

    #[test]
    fn only_md_is_markdown() {
        assert!(NoteFile::new("note.md").is_markdown());
        assert!(!NoteFile::new("note.MD").is_markdown());
        assert!(!NoteFile::new("canvas.canvas").is_markdown());
        assert!(!NoteFile::new("README").is_markdown());
    }
}
