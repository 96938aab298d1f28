//! Classify markdown notes by Traffic Light Protocol level and highlight a
//! host UI surface to match.
//!
//! [`dispatch::handle_file_open`] is the entry point: it takes the settings,
//! the opened note, the host's frontmatter cache and its surfaces, and puts
//! the configured surface into the right highlight state.

pub mod classification;
pub mod cli;
pub mod config;
pub mod dispatch;
pub mod highlight;
pub mod host;
pub mod note;
pub mod path_match;
pub mod storage;

pub use classification::{resolve, Classification, TlpValues};
pub use config::{Settings, Surface};
pub use dispatch::{handle_file_open, Highlighter, Outcome};
pub use highlight::{ClassList, StyleTarget, SurfaceLocator, Workbench};
pub use host::{FileOpenListener, MetadataSource, NoteFile};
