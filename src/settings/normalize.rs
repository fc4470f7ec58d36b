//! Settings normalization
//!
//! Turns any JSON value into a [`Settings`] document that satisfies the
//! document invariants. Nothing here fails: malformed parts are repaired or
//! dropped and the repair is logged.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use super::document::{CountMode, NumberFormat, Settings};
use super::locale::{LocaleDefaults, fallback_number_format};
use crate::types::{LanguageKey, Preset, normalize_language_tag, presets_from_value};

const KEY_LANGUAGE: &str = "language";
const KEY_PRESETS_BY_LANGUAGE: &str = "presetsByLanguage";
const KEY_DISABLED_DEFAULTS: &str = "disabledDefaultPresets";
const KEY_NUMBER_FORMATTING: &str = "numberFormatting";
const KEY_COUNT_MODE: &str = "countMode";
const KEY_LEGACY_PRESETS: &str = "presets";

/// Normalize a raw settings value
///
/// Idempotent: normalizing the serialized output again yields the same
/// document.
pub fn normalize(raw: Value, locale: &dyn LocaleDefaults) -> Settings {
    let mut obj = match raw {
        Value::Object(obj) => obj,
        Value::Null => Map::new(),
        other => {
            tracing::warn!("Settings root is not an object ({}), starting empty", type_name(&other));
            Map::new()
        }
    };

    let language = match obj.remove(KEY_LANGUAGE) {
        Some(Value::String(tag)) => normalize_language_tag(&tag),
        Some(other) => {
            tracing::debug!("Ignoring non-string language: {}", other);
            normalize_language_tag("")
        }
        None => normalize_language_tag(""),
    };
    let key = LanguageKey::from_tag(&language);

    let mut presets_by_language =
        normalize_presets_by_language(obj.remove(KEY_PRESETS_BY_LANGUAGE));

    // The old flat list is consumed here: migrated into the current language
    // if that bucket is missing, otherwise discarded. It is never written back.
    if let Some(legacy) = obj.remove(KEY_LEGACY_PRESETS) {
        if presets_by_language.contains_key(&key) {
            tracing::info!("Discarding legacy presets, '{}' already has a bucket", key);
        } else {
            let migrated = presets_from_value(legacy);
            tracing::info!(
                "Migrated {} legacy presets into language '{}'",
                migrated.len(),
                key
            );
            presets_by_language.insert(key.clone(), migrated);
        }
    }
    presets_by_language.entry(key.clone()).or_default();

    let disabled_default_presets = normalize_disabled(obj.remove(KEY_DISABLED_DEFAULTS));

    let mut number_formatting =
        normalize_number_formatting(obj.remove(KEY_NUMBER_FORMATTING), locale);
    if !number_formatting.contains_key(&key) {
        let format = locale_format(locale, &key);
        tracing::debug!("Derived number formatting for '{}': {:?}", key, format);
        number_formatting.insert(key.clone(), format);
    }

    let count_mode = match obj.remove(KEY_COUNT_MODE) {
        Some(Value::String(raw)) => CountMode::parse(&raw).unwrap_or_else(|| {
            tracing::debug!("Unknown count mode '{}', using default", raw);
            CountMode::default()
        }),
        Some(_) | None => CountMode::default(),
    };

    Settings {
        language,
        presets_by_language,
        disabled_default_presets,
        number_formatting,
        count_mode,
        extra: obj,
    }
}

fn normalize_presets_by_language(value: Option<Value>) -> BTreeMap<LanguageKey, Vec<Preset>> {
    let mut result: BTreeMap<LanguageKey, Vec<Preset>> = BTreeMap::new();
    let Some(buckets) = object_or_warn(value, KEY_PRESETS_BY_LANGUAGE) else {
        return result;
    };
    for (raw_lang, list) in buckets {
        let bucket = result.entry(LanguageKey::from_tag(&raw_lang)).or_default();
        for preset in presets_from_value(list) {
            if !bucket.iter().any(|p| p.name == preset.name) {
                bucket.push(preset);
            }
        }
    }
    result
}

fn normalize_disabled(value: Option<Value>) -> BTreeMap<LanguageKey, Vec<String>> {
    let mut result: BTreeMap<LanguageKey, Vec<String>> = BTreeMap::new();
    let Some(buckets) = object_or_warn(value, KEY_DISABLED_DEFAULTS) else {
        return result;
    };
    for (raw_lang, list) in buckets {
        let Value::Array(items) = list else {
            tracing::debug!("Ignoring non-list disabled defaults for '{}'", raw_lang);
            continue;
        };
        let names = result.entry(LanguageKey::from_tag(&raw_lang)).or_default();
        for item in items {
            match item {
                Value::String(name) if !name.is_empty() => {
                    if !names.contains(&name) {
                        names.push(name);
                    }
                }
                _ => {}
            }
        }
    }
    result.retain(|_, names| !names.is_empty());
    result
}

fn normalize_number_formatting(
    value: Option<Value>,
    locale: &dyn LocaleDefaults,
) -> BTreeMap<LanguageKey, NumberFormat> {
    let mut result: BTreeMap<LanguageKey, NumberFormat> = BTreeMap::new();
    let Some(entries) = object_or_warn(value, KEY_NUMBER_FORMATTING) else {
        return result;
    };
    for (raw_lang, entry) in entries {
        let key = LanguageKey::from_tag(&raw_lang);
        if result.contains_key(&key) {
            continue;
        }
        let format = serde_json::from_value::<NumberFormat>(entry).unwrap_or_else(|_| {
            tracing::debug!("Repairing number formatting for '{}'", key);
            locale_format(locale, &key)
        });
        result.insert(key, format);
    }
    result
}

fn locale_format(locale: &dyn LocaleDefaults, key: &LanguageKey) -> NumberFormat {
    locale
        .number_format_defaults_for(key.as_str())
        .unwrap_or_else(fallback_number_format)
}

fn object_or_warn(value: Option<Value>, field: &str) -> Option<Map<String, Value>> {
    match value {
        Some(Value::Object(obj)) => Some(obj),
        Some(Value::Null) | None => None,
        Some(other) => {
            tracing::warn!("Settings field '{}' is a {}, resetting", field, type_name(&other));
            None
        }
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
