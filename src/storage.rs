use crate::classification::Classification;
use crate::config::{Settings, SettingsSection, Surface};
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("failed to read settings '{}': {}", .path.display(), .source)]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse settings '{}': {}", .path.display(), .source)]
    ParseJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to parse settings '{}': {}", .path.display(), .source)]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("failed to convert settings '{}' from TOML: {}", .path.display(), .source)]
    ConvertToml {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("failed to serialize settings: {0}")]
    SerializeJson(#[from] serde_json::Error),
    #[error("failed to serialize settings: {0}")]
    SerializeToml(#[from] toml::ser::Error),
    #[error("failed to write settings '{}': {}", .path.display(), .source)]
    Write { path: PathBuf, source: io::Error },
}

/// Where the settings blob lives.
pub trait SettingsStorage {
    /// The saved blob, or `None` if nothing has been saved yet.
    fn load(&self) -> Result<Option<Value>, StorageError>;

    fn save(&mut self, settings: &Settings) -> Result<(), StorageError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Json,
    Toml,
}

/// Settings file on disk. `.toml` files are read and written as TOML,
/// anything else as pretty-printed JSON.
#[derive(Debug, Clone)]
pub struct FileStorage {
    path: PathBuf,
    format: FileFormat,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("toml") => FileFormat::Toml,
            _ => FileFormat::Json,
        };
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SettingsStorage for FileStorage {
    fn load(&self) -> Result<Option<Value>, StorageError> {
        let text = match fs::read_to_string(&self.path) {
            Ok(t) => t,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StorageError::Read {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        let value = match self.format {
            FileFormat::Json => {
                serde_json::from_str(&text).map_err(|source| StorageError::ParseJson {
                    path: self.path.clone(),
                    source,
                })?
            }
            FileFormat::Toml => {
                let table: toml::Table =
                    toml::from_str(&text).map_err(|source| StorageError::ParseToml {
                        path: self.path.clone(),
                        source,
                    })?;
                serde_json::to_value(table).map_err(|source| StorageError::ConvertToml {
                    path: self.path.clone(),
                    source,
                })?
            }
        };
        Ok(Some(value))
    }

    fn save(&mut self, settings: &Settings) -> Result<(), StorageError> {
        let text = match self.format {
            FileFormat::Json => serde_json::to_string_pretty(settings)?,
            FileFormat::Toml => toml::to_string_pretty(settings)?,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StorageError::Write {
                path: self.path.clone(),
                source,
            })?;
        }
        fs::write(&self.path, text).map_err(|source| StorageError::Write {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), "settings saved");
        Ok(())
    }
}

/// Settings panel model: every change updates the in-memory settings and
/// then persists them.
#[derive(Debug)]
pub struct SettingsStore<S> {
    settings: Settings,
    storage: S,
}

impl<S: SettingsStorage> SettingsStore<S> {
    /// Load saved settings merged over the defaults.
    pub fn load(storage: S) -> Result<Self, StorageError> {
        let settings = match storage.load()? {
            Some(saved) => Settings::merge_saved(&saved),
            None => Settings::default(),
        };
        Ok(Self { settings, storage })
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn save(&mut self) -> Result<(), StorageError> {
        self.storage.save(&self.settings)
    }

    pub fn set_surface(&mut self, surface: Surface) -> Result<(), StorageError> {
        self.settings.ui_element_to_highlight = surface;
        self.save()
    }

    pub fn toggle_frontmatter_highlight(&mut self) -> Result<bool, StorageError> {
        self.settings.use_frontmatter_highlight = !self.settings.use_frontmatter_highlight;
        self.save()?;
        Ok(self.settings.use_frontmatter_highlight)
    }

    pub fn toggle_path_highlight(&mut self) -> Result<bool, StorageError> {
        self.settings.use_path_highlight = !self.settings.use_path_highlight;
        self.save()?;
        Ok(self.settings.use_path_highlight)
    }

    pub fn set_frontmatter_attribute(&mut self, attribute: &str) -> Result<(), StorageError> {
        self.settings.frontmatter_attribute = attribute.to_string();
        self.save()
    }

    /// Set the matching string for `level`. An empty value stores the
    /// level's default instead.
    pub fn set_classification_value(
        &mut self,
        level: Classification,
        value: &str,
    ) -> Result<(), StorageError> {
        let value = if value.is_empty() {
            level.pretty_name()
        } else {
            value
        };
        *self.settings.tlp_values.get_mut(level) = value.to_string();
        self.save()
    }

    pub fn set_path_to_highlight(&mut self, path: &str) -> Result<(), StorageError> {
        self.settings.path_to_highlight = path.to_string();
        self.save()
    }

    /// Sections the panel shows for the current settings, in display order.
    pub fn sections(&self) -> Vec<SettingsSection> {
        self.settings.sections()
    }
}
