use crate::classification::{Classification, TlpValues};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Host UI element that receives the highlight classes.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub enum Surface {
    #[default]
    #[serde(rename = "titlebar")]
    Titlebar,
    #[serde(rename = "view-header")]
    ViewHeader,
    #[serde(rename = "view-content")]
    ViewContent,
}

impl Surface {
    pub const ALL: [Surface; 3] = [Surface::Titlebar, Surface::ViewHeader, Surface::ViewContent];

    /// Class name the host renders the element with.
    pub fn as_str(self) -> &'static str {
        match self {
            Surface::Titlebar => "titlebar",
            Surface::ViewHeader => "view-header",
            Surface::ViewContent => "view-content",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Surface::Titlebar => "Titlebar",
            Surface::ViewHeader => "Header",
            Surface::ViewContent => "Content",
        }
    }
}

impl fmt::Display for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown surface '{0}' (expected titlebar, view-header or view-content)")]
pub struct UnknownSurface(pub String);

impl FromStr for Surface {
    type Err = UnknownSurface;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Surface::ALL
            .into_iter()
            .find(|surface| surface.as_str() == s)
            .ok_or_else(|| UnknownSurface(s.to_string()))
    }
}

/// Section of the settings panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsSection {
    /// Dropdown choosing the surface to highlight.
    Surface,
    /// The two strategy toggles.
    Toggles,
    /// Attribute name plus one matching string per level.
    Frontmatter,
    /// Substring that marks a path as red.
    Path,
}

const KEY_USE_FRONTMATTER: &str = "useFrontmatterHighlight";
const KEY_USE_PATH: &str = "usePathHighlight";
const KEY_ATTRIBUTE: &str = "frontmatterAttribute";
const KEY_TLP_VALUES: &str = "tlpValues";
const KEY_PATH: &str = "pathToHighlight";
const KEY_SURFACE: &str = "uiElementToHighlight";

/// Persisted highlighter configuration.
///
/// Serialized with the camelCase keys the host stores in the plugin's data
/// blob. Loading goes through [`Settings::merge_saved`] rather than plain
/// deserialization so partial or stale blobs still produce a usable value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub use_frontmatter_highlight: bool,
    pub use_path_highlight: bool,
    pub frontmatter_attribute: String,
    pub tlp_values: TlpValues,
    pub path_to_highlight: String,
    pub ui_element_to_highlight: Surface,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            use_frontmatter_highlight: true,
            use_path_highlight: false,
            frontmatter_attribute: "classification".to_string(),
            tlp_values: TlpValues::default(),
            path_to_highlight: String::new(),
            ui_element_to_highlight: Surface::Titlebar,
        }
    }
}

impl Settings {
    /// Settings panel sections visible for these settings, in display order.
    pub fn sections(&self) -> Vec<SettingsSection> {
        let mut sections = vec![SettingsSection::Surface, SettingsSection::Toggles];
        if self.use_frontmatter_highlight {
            sections.push(SettingsSection::Frontmatter);
        }
        if self.use_path_highlight {
            sections.push(SettingsSection::Path);
        }
        sections
    }

    /// Overlay a saved blob onto the defaults.
    ///
    /// Top-level keys replace defaults only when they carry the expected JSON
    /// type; `tlpValues` is merged level by level. Unknown keys are ignored and
    /// anything that is not an object yields the defaults.
    pub fn merge_saved(saved: &Value) -> Self {
        let mut settings = Self::default();
        let Some(obj) = saved.as_object() else {
            if !saved.is_null() {
                tracing::warn!("saved settings are not an object; using defaults");
            }
            return settings;
        };

        if let Some(v) = saved_bool(obj, KEY_USE_FRONTMATTER) {
            settings.use_frontmatter_highlight = v;
        }
        if let Some(v) = saved_bool(obj, KEY_USE_PATH) {
            settings.use_path_highlight = v;
        }
        if let Some(v) = saved_string(obj, KEY_ATTRIBUTE) {
            settings.frontmatter_attribute = v;
        }
        if let Some(v) = saved_string(obj, KEY_PATH) {
            settings.path_to_highlight = v;
        }
        if let Some(v) = saved_string(obj, KEY_SURFACE) {
            match v.parse::<Surface>() {
                Ok(surface) => settings.ui_element_to_highlight = surface,
                Err(e) => tracing::warn!("{}; keeping {}", e, settings.ui_element_to_highlight),
            }
        }

        match obj.get(KEY_TLP_VALUES) {
            None | Some(Value::Null) => {}
            Some(Value::Object(levels)) => {
                for level in Classification::ALL {
                    if let Some(v) = saved_string(levels, level.as_str()) {
                        *settings.tlp_values.get_mut(level) = v;
                    }
                }
            }
            Some(_) => {
                tracing::warn!(key = KEY_TLP_VALUES, "expected an object; using defaults")
            }
        }

        settings
    }
}

fn saved_bool(obj: &Map<String, Value>, key: &str) -> Option<bool> {
    match obj.get(key)? {
        Value::Bool(b) => Some(*b),
        Value::Null => None,
        other => {
            tracing::warn!(key, value = %other, "expected a boolean; using default");
            None
        }
    }
}

fn saved_string(obj: &Map<String, Value>, key: &str) -> Option<String> {
    match obj.get(key)? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => {
            tracing::warn!(key, value = %other, "expected a string; using default");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults() {
        let s = Settings::default();
        assert!(s.use_frontmatter_highlight);
        assert!(!s.use_path_highlight);
        assert_eq!(s.frontmatter_attribute, "classification");
        assert_eq!(s.path_to_highlight, "");
        assert_eq!(s.ui_element_to_highlight, Surface::Titlebar);
        assert_eq!(s.tlp_values.amber_strict, "AMBER:STRICT");
    }

    #[test]
    fn merge_null_yields_defaults() {
        assert_eq!(Settings::merge_saved(&Value::Null), Settings::default());
        assert_eq!(Settings::merge_saved(&json!("garbage")), Settings::default());
    }

    #[test]
    fn merge_overlays_saved_fields() {
        let saved = json!({
            "useFrontmatterHighlight": false,
            "usePathHighlight": true,
            "frontmatterAttribute": "tlp",
            "pathToHighlight": "Private/",
            "uiElementToHighlight": "view-content",
        });
        let s = Settings::merge_saved(&saved);
        assert!(!s.use_frontmatter_highlight);
        assert!(s.use_path_highlight);
        assert_eq!(s.frontmatter_attribute, "tlp");
        assert_eq!(s.path_to_highlight, "Private/");
        assert_eq!(s.ui_element_to_highlight, Surface::ViewContent);
        assert_eq!(s.tlp_values, TlpValues::default());
    }

    #[test]
    fn merge_defaults_tlp_values_per_level() {
        let saved = json!({ "tlpValues": { "red": "SECRET", "amberStrict": "need-to-know" } });
        let s = Settings::merge_saved(&saved);
        assert_eq!(s.tlp_values.red, "SECRET");
        assert_eq!(s.tlp_values.amber_strict, "need-to-know");
        assert_eq!(s.tlp_values.white, "WHITE");
        assert_eq!(s.tlp_values.green, "GREEN");
        assert_eq!(s.tlp_values.amber, "AMBER");
    }

    #[test]
    fn merge_tolerates_wrong_types_and_unknown_keys() {
        let saved = json!({
            "usePathHighlight": "yes",
            "frontmatterAttribute": 42,
            "tlpValues": ["RED"],
            "uiElementToHighlight": "sidebar",
            "legacyOption": true,
        });
        assert_eq!(Settings::merge_saved(&saved), Settings::default());
    }

    #[test]
    fn serialized_keys_match_saved_layout() {
        let value = serde_json::to_value(Settings::default()).unwrap();
        assert_eq!(value["uiElementToHighlight"], "titlebar");
        assert_eq!(value["tlpValues"]["amberStrict"], "AMBER:STRICT");
        assert_eq!(value["useFrontmatterHighlight"], true);
        assert_eq!(Settings::merge_saved(&value), Settings::default());
    }

    #[test]
    fn surface_round_trips_through_its_class_name() {
        for surface in Surface::ALL {
            assert_eq!(surface.as_str().parse::<Surface>(), Ok(surface));
        }
        assert!("Titlebar".parse::<Surface>().is_err());
    }
}
