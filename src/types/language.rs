//! Language identifiers
//!
//! Two forms are used: the raw tag the user picked (kept normalized, e.g.
//! `en-us`) and the [`LanguageKey`] that scopes presets and formatting
//! (`en`).

use std::fmt;

use serde::{Deserialize, Serialize};

/// Language used whenever a tag is missing or unusable
pub const DEFAULT_LANGUAGE: &str = "es";

/// Normalize a raw language tag
///
/// Lower-cases, maps `_` to `-` and drops anything that is not
/// alphanumeric or a hyphen. Empty results fall back to [`DEFAULT_LANGUAGE`].
pub fn normalize_language_tag(raw: &str) -> String {
    let tag: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .map(|c| if c == '_' { '-' } else { c })
        .filter(|c| c.is_ascii_alphanumeric() || *c == '-')
        .collect();
    let tag = tag.trim_matches('-');
    if tag.is_empty() {
        DEFAULT_LANGUAGE.to_string()
    } else {
        tag.to_string()
    }
}

/// Base language key scoping presets, disabled defaults and number formatting
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LanguageKey(String);

impl LanguageKey {
    /// Derive a key from any raw tag (`en-US`, `pt_BR`, `zh-Hant-TW`, ...)
    pub fn from_tag(raw: &str) -> Self {
        let lowered = raw.trim().to_lowercase();
        let base: String = lowered
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect();
        if base.is_empty() {
            Self(DEFAULT_LANGUAGE.to_string())
        } else {
            Self(base)
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for LanguageKey {
    fn default() -> Self {
        Self(DEFAULT_LANGUAGE.to_string())
    }
}

impl fmt::Display for LanguageKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LanguageKey {
    fn from(raw: &str) -> Self {
        Self::from_tag(raw)
    }
}

impl AsRef<str> for LanguageKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_strips_region_and_script() {
        assert_eq!(LanguageKey::from_tag("en-US").as_str(), "en");
        assert_eq!(LanguageKey::from_tag("pt_BR").as_str(), "pt");
        assert_eq!(LanguageKey::from_tag("zh-Hant-TW").as_str(), "zh");
        assert_eq!(LanguageKey::from_tag("  FR ").as_str(), "fr");
    }

    #[test]
    fn test_key_falls_back_to_default() {
        assert_eq!(LanguageKey::from_tag("").as_str(), "es");
        assert_eq!(LanguageKey::from_tag("-US").as_str(), "es");
        assert_eq!(LanguageKey::from_tag("!!").as_str(), "es");
        assert_eq!(LanguageKey::default().as_str(), DEFAULT_LANGUAGE);
    }

    #[test]
    fn test_key_drops_non_alphanumeric() {
        assert_eq!(LanguageKey::from_tag("e.n").as_str(), "en");
        assert_eq!(LanguageKey::from_tag("../de").as_str(), "de");
    }

    #[test]
    fn test_normalize_language_tag() {
        assert_eq!(normalize_language_tag("en-US"), "en-us");
        assert_eq!(normalize_language_tag("pt_BR"), "pt-br");
        assert_eq!(normalize_language_tag(" ES "), "es");
        assert_eq!(normalize_language_tag(""), "es");
        assert_eq!(normalize_language_tag("--"), "es");
    }
}
