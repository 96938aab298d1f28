use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;
use std::str::FromStr;

/// Traffic Light Protocol level a note can be classified as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Classification {
    White,
    Green,
    Amber,
    AmberStrict,
    Red,
}

impl Classification {
    /// Every level in resolution order. The first configured match wins.
    pub const ALL: [Classification; 5] = [
        Classification::White,
        Classification::Green,
        Classification::Amber,
        Classification::AmberStrict,
        Classification::Red,
    ];

    /// Identifier used in persisted settings and CSS class names.
    pub fn as_str(self) -> &'static str {
        match self {
            Classification::White => "white",
            Classification::Green => "green",
            Classification::Amber => "amber",
            Classification::AmberStrict => "amberStrict",
            Classification::Red => "red",
        }
    }

    /// Display label, also the default matching string for the level.
    pub fn pretty_name(self) -> &'static str {
        match self {
            Classification::White => "WHITE",
            Classification::Green => "GREEN",
            Classification::Amber => "AMBER",
            Classification::AmberStrict => "AMBER:STRICT",
            Classification::Red => "RED",
        }
    }

    /// The per-level CSS class, e.g. `tlp-amberStrict`.
    pub fn class_name(self) -> &'static str {
        match self {
            Classification::White => "tlp-white",
            Classification::Green => "tlp-green",
            Classification::Amber => "tlp-amber",
            Classification::AmberStrict => "tlp-amberStrict",
            Classification::Red => "tlp-red",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown classification '{0}' (expected white, green, amber, amberStrict or red)")]
pub struct UnknownClassification(pub String);

impl FromStr for Classification {
    type Err = UnknownClassification;

    /// Accepts the identifier (`amberStrict`) or the kebab form (`amber-strict`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace(['-', '_'], "");
        Classification::ALL
            .into_iter()
            .find(|level| level.as_str().to_ascii_lowercase() == wanted)
            .ok_or_else(|| UnknownClassification(s.to_string()))
    }
}

/// Matching string configured for each classification level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TlpValues {
    pub white: String,
    pub green: String,
    pub amber: String,
    pub amber_strict: String,
    pub red: String,
}

impl Default for TlpValues {
    fn default() -> Self {
        Self {
            white: Classification::White.pretty_name().to_string(),
            green: Classification::Green.pretty_name().to_string(),
            amber: Classification::Amber.pretty_name().to_string(),
            amber_strict: Classification::AmberStrict.pretty_name().to_string(),
            red: Classification::Red.pretty_name().to_string(),
        }
    }
}

impl TlpValues {
    pub fn get(&self, level: Classification) -> &str {
        match level {
            Classification::White => &self.white,
            Classification::Green => &self.green,
            Classification::Amber => &self.amber,
            Classification::AmberStrict => &self.amber_strict,
            Classification::Red => &self.red,
        }
    }

    pub fn get_mut(&mut self, level: Classification) -> &mut String {
        match level {
            Classification::White => &mut self.white,
            Classification::Green => &mut self.green,
            Classification::Amber => &mut self.amber,
            Classification::AmberStrict => &mut self.amber_strict,
            Classification::Red => &mut self.red,
        }
    }

    /// Match already-extracted text against the configured values.
    ///
    /// Comparison is exact after trimming and lowercasing both sides. Levels
    /// with an empty configured value never match.
    pub fn classify(&self, text: &str) -> Option<Classification> {
        let normalized = text.trim().to_lowercase();
        Classification::ALL.into_iter().find(|&level| {
            let configured = self.get(level).trim().to_lowercase();
            !configured.is_empty() && configured == normalized
        })
    }
}

/// Resolve a raw frontmatter value to a classification.
///
/// Absent and falsy values (null, `false`, zero, empty string) resolve to
/// `None`. Anything else is coerced to text and matched via
/// [`TlpValues::classify`].
pub fn resolve(raw: Option<&Value>, values: &TlpValues) -> Option<Classification> {
    let text = coerce_text(raw?)?;
    values.classify(&text)
}

/// Lenient text conversion for metadata values of any shape.
///
/// Returns `None` for falsy scalars and for objects, which have no useful
/// text form.
fn coerce_text(value: &Value) -> Option<String> {
    match value {
        Value::Null | Value::Bool(false) => None,
        Value::Bool(true) => Some("true".to_string()),
        Value::Number(n) => {
            if n.as_f64() == Some(0.0) {
                None
            } else {
                Some(number_text(n))
            }
        }
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(join_items(items)),
        Value::Object(_) => None,
    }
}

// Integral floats print without a fraction, so `1.0` reads as `1`.
fn number_text(n: &Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => f.to_string(),
        _ => n.to_string(),
    }
}

// List items are joined with commas; null items contribute nothing.
fn join_items(items: &[Value]) -> String {
    items
        .iter()
        .map(|item| match item {
            Value::Null => String::new(),
            Value::Bool(b) => b.to_string(),
            Value::Number(n) => number_text(n),
            Value::String(s) => s.clone(),
            Value::Array(inner) => join_items(inner),
            Value::Object(_) => String::new(),
        })
        .collect::<Vec<_>>()
        .join(",")
}
