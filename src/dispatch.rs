use crate::classification::{self, Classification};
use crate::config::{Settings, Surface};
use crate::highlight::{self, SurfaceLocator};
use crate::host::{FileOpenListener, MetadataSource, NoteFile};
use crate::path_match;
use serde::Serialize;

/// Which strategy produced the classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Strategy {
    /// Path matched the configured substring.
    Path,
    /// Path highlighting is on but the path did not match, so the
    /// frontmatter was consulted instead.
    PathFallback,
    Frontmatter,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum IgnoreReason {
    NoFile,
    NotMarkdown,
    HighlightingDisabled,
}

/// What handling one file-open notification did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing was touched; any previous highlight is still in place.
    Ignored(IgnoreReason),
    Applied {
        strategy: Strategy,
        classification: Option<Classification>,
        surface: Surface,
        /// `false` when the surface was not rendered and nothing changed.
        surface_found: bool,
    },
}

/// The classification the path strategy assigns on a match.
pub const PATH_MATCH_CLASSIFICATION: Classification = Classification::Red;

/// Handle one file-open notification.
///
/// Path highlighting takes precedence. A path match highlights the note as
/// red; a miss clears the surface and falls back to the frontmatter, even
/// when frontmatter highlighting is switched off.
pub fn handle_file_open(
    settings: &Settings,
    file: Option<&NoteFile>,
    metadata: &dyn MetadataSource,
    surfaces: &mut dyn SurfaceLocator,
) -> Outcome {
    let Some(file) = file else {
        return Outcome::Ignored(IgnoreReason::NoFile);
    };
    if !file.is_markdown() {
        tracing::trace!(path = %file.path, "not a markdown note");
        return Outcome::Ignored(IgnoreReason::NotMarkdown);
    }

    let surface = settings.ui_element_to_highlight;

    if settings.use_path_highlight {
        if path_match::matches(&file.path, &settings.path_to_highlight) {
            tracing::debug!(
                path = %file.path,
                pattern = %settings.path_to_highlight,
                "path matched"
            );
            let surface_found =
                highlight::apply(surfaces, surface, Some(PATH_MATCH_CLASSIFICATION));
            return Outcome::Applied {
                strategy: Strategy::Path,
                classification: Some(PATH_MATCH_CLASSIFICATION),
                surface,
                surface_found,
            };
        }

        highlight::apply(surfaces, surface, None);
        let (classification, surface_found) =
            highlight_from_frontmatter(settings, file, metadata, surfaces);
        return Outcome::Applied {
            strategy: Strategy::PathFallback,
            classification,
            surface,
            surface_found,
        };
    }

    if settings.use_frontmatter_highlight {
        let (classification, surface_found) =
            highlight_from_frontmatter(settings, file, metadata, surfaces);
        return Outcome::Applied {
            strategy: Strategy::Frontmatter,
            classification,
            surface,
            surface_found,
        };
    }

    Outcome::Ignored(IgnoreReason::HighlightingDisabled)
}

fn highlight_from_frontmatter(
    settings: &Settings,
    file: &NoteFile,
    metadata: &dyn MetadataSource,
    surfaces: &mut dyn SurfaceLocator,
) -> (Option<Classification>, bool) {
    let raw = metadata.frontmatter_value(file, &settings.frontmatter_attribute);
    let classification = classification::resolve(raw.as_ref(), &settings.tlp_values);
    tracing::debug!(
        path = %file.path,
        attribute = %settings.frontmatter_attribute,
        ?classification,
        "frontmatter resolved"
    );
    let surface_found =
        highlight::apply(surfaces, settings.ui_element_to_highlight, classification);
    (classification, surface_found)
}

/// Binds settings, metadata and surfaces into a [`FileOpenListener`].
pub struct Highlighter<'a> {
    settings: &'a Settings,
    metadata: &'a dyn MetadataSource,
    surfaces: &'a mut dyn SurfaceLocator,
    last_outcome: Option<Outcome>,
}

impl<'a> Highlighter<'a> {
    pub fn new(
        settings: &'a Settings,
        metadata: &'a dyn MetadataSource,
        surfaces: &'a mut dyn SurfaceLocator,
    ) -> Self {
        Self {
            settings,
            metadata,
            surfaces,
            last_outcome: None,
        }
    }

    /// Outcome of the most recent notification.
    pub fn last_outcome(&self) -> Option<&Outcome> {
        self.last_outcome.as_ref()
    }
}

impl FileOpenListener for Highlighter<'_> {
    fn on_file_open(&mut self, file: Option<&NoteFile>) {
        let outcome = handle_file_open(self.settings, file, self.metadata, &mut *self.surfaces);
        self.last_outcome = Some(outcome);
    }
}
