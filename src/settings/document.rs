//! The persisted settings document

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::types::{DEFAULT_LANGUAGE, LanguageKey, Preset};

/// How words are counted in the text editor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountMode {
    /// Locale-aware word segmentation (default)
    #[default]
    Precise,
    /// Whitespace split
    Simple,
}

impl CountMode {
    /// Parse a stored value, `None` for anything unrecognized
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "precise" => Some(CountMode::Precise),
            "simple" => Some(CountMode::Simple),
            _ => None,
        }
    }
}

/// Separators used when displaying numbers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumberFormat {
    pub thousands_separator: String,
    pub decimal_separator: String,
}

impl NumberFormat {
    pub fn new(thousands: impl Into<String>, decimal: impl Into<String>) -> Self {
        Self {
            thousands_separator: thousands.into(),
            decimal_separator: decimal.into(),
        }
    }
}

/// Application settings document
///
/// Stored as a single JSON file. Build one through
/// [`normalize`](super::normalize) or [`SettingsStore`](super::SettingsStore)
/// so the invariants hold: the current language always has a preset bucket
/// and a number format, and no empty disabled-name lists are kept.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    /// Last selected language tag, normalized (e.g. `en-us`)
    pub language: String,

    /// User-owned presets per language, in display order
    #[serde(default)]
    pub presets_by_language: BTreeMap<LanguageKey, Vec<Preset>>,

    /// Default preset names the user chose to hide, per language
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub disabled_default_presets: BTreeMap<LanguageKey, Vec<String>>,

    /// Cached number formatting per language
    #[serde(default)]
    pub number_formatting: BTreeMap<LanguageKey, NumberFormat>,

    #[serde(default)]
    pub count_mode: CountMode,

    /// Unknown top-level fields, preserved on round-trip
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            language: DEFAULT_LANGUAGE.to_string(),
            presets_by_language: BTreeMap::new(),
            disabled_default_presets: BTreeMap::new(),
            number_formatting: BTreeMap::new(),
            count_mode: CountMode::default(),
            extra: Map::new(),
        }
    }
}

impl Settings {
    /// Key of the currently selected language
    pub fn language_key(&self) -> LanguageKey {
        LanguageKey::from_tag(&self.language)
    }

    /// User presets for a language (empty when the bucket is missing)
    pub fn presets_for(&self, language: &LanguageKey) -> &[Preset] {
        self.presets_by_language
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Mutable user preset bucket, created on demand
    pub fn presets_for_mut(&mut self, language: &LanguageKey) -> &mut Vec<Preset> {
        self.presets_by_language
            .entry(language.clone())
            .or_default()
    }

    pub fn find_preset(&self, language: &LanguageKey, name: &str) -> Option<&Preset> {
        self.presets_for(language).iter().find(|p| p.name == name)
    }

    /// Insert a preset, replacing the first one with the same name
    ///
    /// Returns `true` when an existing preset was replaced.
    pub fn upsert_preset(&mut self, language: &LanguageKey, preset: Preset) -> bool {
        let bucket = self.presets_for_mut(language);
        match bucket.iter_mut().find(|p| p.name == preset.name) {
            Some(existing) => {
                *existing = preset;
                true
            }
            None => {
                bucket.push(preset);
                false
            }
        }
    }

    /// Remove the first user preset with this name
    pub fn remove_preset(&mut self, language: &LanguageKey, name: &str) -> Option<Preset> {
        let bucket = self.presets_by_language.get_mut(language)?;
        let index = bucket.iter().position(|p| p.name == name)?;
        Some(bucket.remove(index))
    }

    /// Disabled default names for a language
    pub fn disabled_for(&self, language: &LanguageKey) -> &[String] {
        self.disabled_default_presets
            .get(language)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn is_disabled(&self, language: &LanguageKey, name: &str) -> bool {
        self.disabled_for(language).iter().any(|n| n == name)
    }

    /// Flag a default as hidden; returns `false` if it already was
    pub fn disable_default(&mut self, language: &LanguageKey, name: &str) -> bool {
        let names = self
            .disabled_default_presets
            .entry(language.clone())
            .or_default();
        if names.iter().any(|n| n == name) {
            return false;
        }
        names.push(name.to_string());
        true
    }

    /// Drop empty disabled-name lists
    pub fn prune_disabled(&mut self) {
        self.disabled_default_presets
            .retain(|_, names| !names.is_empty());
    }

    pub fn number_format_for(&self, language: &LanguageKey) -> Option<&NumberFormat> {
        self.number_formatting.get(language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_count_mode_parse() {
        assert_eq!(CountMode::parse("precise"), Some(CountMode::Precise));
        assert_eq!(CountMode::parse(" Simple "), Some(CountMode::Simple));
        assert_eq!(CountMode::parse("fuzzy"), None);
    }

    #[test]
    fn test_upsert_replaces_first_match() {
        let en = LanguageKey::from_tag("en");
        let mut settings = Settings::default();

        assert!(!settings.upsert_preset(&en, Preset::new("Fast", 400)));
        assert!(!settings.upsert_preset(&en, Preset::new("Slow", 150)));
        assert!(settings.upsert_preset(&en, Preset::new("Fast", 450)));

        let names: Vec<_> = settings.presets_for(&en).iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Fast", "Slow"]);
        assert_eq!(settings.find_preset(&en, "Fast").unwrap().wpm(), Some(450.0));
    }

    #[test]
    fn test_remove_preset() {
        let en = LanguageKey::from_tag("en");
        let mut settings = Settings::default();
        settings.upsert_preset(&en, Preset::new("Fast", 400));

        assert!(settings.remove_preset(&en, "Fast").is_some());
        assert!(settings.remove_preset(&en, "Fast").is_none());
        assert!(settings.remove_preset(&LanguageKey::from_tag("de"), "Fast").is_none());
    }

    #[test]
    fn test_disable_default_is_idempotent() {
        let en = LanguageKey::from_tag("en");
        let mut settings = Settings::default();

        assert!(settings.disable_default(&en, "Fast"));
        assert!(!settings.disable_default(&en, "Fast"));
        assert_eq!(settings.disabled_for(&en), ["Fast".to_string()]);
        assert!(settings.is_disabled(&en, "Fast"));
    }

    #[test]
    fn test_prune_disabled_removes_empty_lists() {
        let en = LanguageKey::from_tag("en");
        let mut settings = Settings::default();
        settings.disabled_default_presets.insert(en.clone(), Vec::new());
        settings.prune_disabled();
        assert!(settings.disabled_default_presets.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let en = LanguageKey::from_tag("en");
        let mut settings = Settings {
            language: "en-us".to_string(),
            ..Settings::default()
        };
        settings.upsert_preset(&en, Preset::new("Fast", 400));
        settings
            .number_formatting
            .insert(en.clone(), NumberFormat::new(",", "."));
        settings.extra.insert("theme".to_string(), json!("dark"));

        let value = serde_json::to_value(&settings).unwrap();
        assert_eq!(
            value,
            json!({
                "language": "en-us",
                "presetsByLanguage": {"en": [{"name": "Fast", "wpm": 400}]},
                "numberFormatting": {"en": {"thousandsSeparator": ",", "decimalSeparator": "."}},
                "countMode": "precise",
                "theme": "dark"
            })
        );
    }
}
