use crate::classification::Classification;
use crate::config::Surface;
use std::collections::{BTreeMap, BTreeSet};

/// Strong highlight, used on the titlebar.
pub const INTENSITY_CLASS: &str = "tlp-highlight";
/// Lighter highlight, used on the header and content surfaces.
pub const INTENSITY_CLASS_LIGHT: &str = "tlp-highlight-light";

/// Every class this crate may put on a surface.
pub const HIGHLIGHT_CLASSNAMES: [&str; 7] = [
    INTENSITY_CLASS,
    INTENSITY_CLASS_LIGHT,
    "tlp-white",
    "tlp-green",
    "tlp-amber",
    "tlp-amberStrict",
    "tlp-red",
];

/// Something whose CSS class set can be edited.
pub trait StyleTarget {
    /// Remove the given classes. Classes not present are ignored.
    fn clear(&mut self, class_names: &[&str]);

    /// Add the given classes. Classes already present are kept once.
    fn add(&mut self, class_names: &[&str]);
}

/// Finds the element rendered for a surface, if the host has rendered it.
pub trait SurfaceLocator {
    fn locate(&mut self, surface: Surface) -> Option<&mut dyn StyleTarget>;
}

/// In-memory class set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassList {
    classes: BTreeSet<String>,
}

impl ClassList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_classes(class_names: &[&str]) -> Self {
        let mut list = Self::new();
        list.add(class_names);
        list
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.classes.contains(class_name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

impl StyleTarget for ClassList {
    fn clear(&mut self, class_names: &[&str]) {
        for name in class_names {
            self.classes.remove(*name);
        }
    }

    fn add(&mut self, class_names: &[&str]) {
        for name in class_names {
            self.classes.insert((*name).to_string());
        }
    }
}

/// The set of host surfaces, each backed by a [`ClassList`].
///
/// Surfaces start rendered and empty. A surface marked hidden cannot be
/// located, the same as a view the host has not rendered yet.
#[derive(Debug, Clone)]
pub struct Workbench {
    surfaces: BTreeMap<Surface, ClassList>,
    hidden: BTreeSet<Surface>,
}

impl Default for Workbench {
    fn default() -> Self {
        Self {
            surfaces: Surface::ALL
                .into_iter()
                .map(|surface| (surface, ClassList::new()))
                .collect(),
            hidden: BTreeSet::new(),
        }
    }
}

impl Workbench {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn classes(&self, surface: Surface) -> &ClassList {
        &self.surfaces[&surface]
    }

    pub fn classes_mut(&mut self, surface: Surface) -> &mut ClassList {
        self.surfaces.entry(surface).or_default()
    }

    pub fn set_rendered(&mut self, surface: Surface, rendered: bool) {
        if rendered {
            self.hidden.remove(&surface);
        } else {
            self.hidden.insert(surface);
        }
    }
}

impl SurfaceLocator for Workbench {
    fn locate(&mut self, surface: Surface) -> Option<&mut dyn StyleTarget> {
        if self.hidden.contains(&surface) {
            return None;
        }
        self.surfaces
            .get_mut(&surface)
            .map(|list| list as &mut dyn StyleTarget)
    }
}

/// Intensity class for a surface kind.
pub fn intensity_class(surface: Surface) -> &'static str {
    match surface {
        Surface::Titlebar => INTENSITY_CLASS,
        Surface::ViewHeader | Surface::ViewContent => INTENSITY_CLASS_LIGHT,
    }
}

/// Put `surface` into the state for `classification`.
///
/// All highlight classes are cleared first, then the intensity class and the
/// level class are added when a classification is given. Returns `false`
/// without touching anything when the surface cannot be located.
pub fn apply(
    locator: &mut dyn SurfaceLocator,
    surface: Surface,
    classification: Option<Classification>,
) -> bool {
    let Some(target) = locator.locate(surface) else {
        tracing::trace!(%surface, "surface not rendered; nothing to highlight");
        return false;
    };

    target.clear(&HIGHLIGHT_CLASSNAMES);
    if let Some(level) = classification {
        target.add(&[intensity_class(surface), level.class_name()]);
    }
    true
}
