//! Reading speed preset record

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

const FIELD_NAME: &str = "name";
const FIELD_WPM: &str = "wpm";
const FIELD_DESCRIPTION: &str = "description";

/// A reading speed preset
///
/// `name` is the identity within one language scope. Every other field,
/// `wpm` and `description` included, is an opaque payload carried through
/// untouched whatever its JSON type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preset {
    pub name: String,

    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Preset {
    pub fn new(name: impl Into<String>, wpm: u32) -> Self {
        let mut fields = Map::new();
        fields.insert(FIELD_WPM.to_string(), Value::from(wpm));
        Self {
            name: name.into(),
            fields,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.fields
            .insert(FIELD_DESCRIPTION.to_string(), Value::String(description.into()));
        self
    }

    /// Words per minute, read leniently (a number or a numeric string)
    pub fn wpm(&self) -> Option<f64> {
        match self.fields.get(FIELD_WPM)? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse().ok(),
            _ => None,
        }
    }

    pub fn description(&self) -> Option<&str> {
        self.fields.get(FIELD_DESCRIPTION).and_then(Value::as_str)
    }

    /// Lenient conversion from an arbitrary JSON value
    ///
    /// Returns `None` for anything that is not an object with a non-empty
    /// string `name`.
    pub fn from_value(value: Value) -> Option<Self> {
        let Value::Object(mut fields) = value else {
            return None;
        };
        let name = match fields.remove(FIELD_NAME) {
            Some(Value::String(name)) if !name.trim().is_empty() => name,
            _ => return None,
        };
        Some(Self { name, fields })
    }
}

/// Parse a JSON array into presets, dropping unusable entries
///
/// Within the list the first occurrence of a name wins.
pub fn presets_from_value(value: Value) -> Vec<Preset> {
    let Value::Array(items) = value else {
        return Vec::new();
    };
    let mut presets: Vec<Preset> = Vec::with_capacity(items.len());
    for item in items {
        match Preset::from_value(item) {
            Some(preset) => {
                if presets.iter().any(|p| p.name == preset.name) {
                    tracing::debug!("Skipping duplicate preset name: {}", preset.name);
                } else {
                    presets.push(preset);
                }
            }
            None => tracing::debug!("Skipping preset entry without a usable name"),
        }
    }
    presets
}
