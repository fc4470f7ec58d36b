//! Settings store
//!
//! Load, normalize and persist the settings document. Every load re-reads
//! the backend; nothing is cached between calls.

use std::path::PathBuf;

use serde_json::Value;

use super::backend::{FileBackend, MemoryBackend, SettingsBackend};
use super::document::{CountMode, NumberFormat, Settings};
use super::locale::{BuiltinLocaleTable, LocaleDefaults};
use super::normalize::normalize;
use crate::tracing::{ErrorTraceExt, ResultTraceExt};
use crate::types::{LanguageKey, PresetError, normalize_language_tag};

/// Loads and persists the single settings document
#[derive(Debug)]
pub struct SettingsStore {
    backend: Box<dyn SettingsBackend>,
    locale: Box<dyn LocaleDefaults>,
}

impl SettingsStore {
    pub fn new(
        backend: impl SettingsBackend + 'static,
        locale: impl LocaleDefaults + 'static,
    ) -> Self {
        Self {
            backend: Box::new(backend),
            locale: Box::new(locale),
        }
    }

    /// Store backed by a JSON file, using the built-in locale table
    pub fn open(path: impl Into<PathBuf>) -> Self {
        Self::new(FileBackend::new(path), BuiltinLocaleTable)
    }

    /// Store kept in memory, using the built-in locale table
    pub fn in_memory() -> Self {
        Self::new(MemoryBackend::new(), BuiltinLocaleTable)
    }

    /// Normalize a raw value with this store's locale source
    pub fn normalize(&self, raw: Value) -> Settings {
        normalize(raw, self.locale.as_ref())
    }

    /// Read, normalize and return the document
    ///
    /// An absent or corrupt document is replaced by the normalized seed and
    /// written back; corrupt text is first handed to the backend's backup. If
    /// the backend cannot be read, or the backup fails, nothing is written.
    pub fn load(&self) -> Settings {
        let (raw_text, readable) = match self.backend.read().trace_context() {
            Ok(text) => (text, true),
            Err(_) => (None, false),
        };

        let (raw, corrupt) = match raw_text.as_deref() {
            Some(text) => match serde_json::from_str(text) {
                Ok(value) => (value, false),
                Err(e) => {
                    tracing::warn!("Settings document is not valid JSON, resetting: {}", e);
                    (Value::Null, true)
                }
            },
            None => (Value::Null, false),
        };

        let settings = self.normalize(raw);

        // Never replace text we could not parse unless a copy of it was kept
        let backed_up = match raw_text.as_deref() {
            Some(text) if corrupt => self.backend.backup(text).trace_context().is_ok(),
            _ => true,
        };

        if readable && backed_up {
            match serialize(&settings) {
                Ok(text) if raw_text.as_deref() != Some(text.as_str()) => {
                    tracing::debug!("Writing back normalized settings");
                    self.write_text(&text);
                }
                Ok(_) => {}
                Err(e) => {
                    e.trace_error();
                }
            }
        }

        settings
    }

    /// Normalize and persist; returns the normalized copy that was written
    ///
    /// Write failures are logged. The normalized document is returned either way.
    pub fn save(&self, settings: Settings) -> Settings {
        let normalized = match serde_json::to_value(&settings).trace_context() {
            Ok(value) => self.normalize(value),
            Err(_) => return settings,
        };

        match serialize(&normalized) {
            Ok(text) => self.write_text(&text),
            Err(e) => {
                e.trace_error();
            }
        }
        normalized
    }

    /// Select a language; its buckets are filled by normalization
    pub fn set_language(&self, tag: &str) -> Settings {
        let mut settings = self.load();
        settings.language = normalize_language_tag(tag);
        tracing::info!("Language set to '{}'", settings.language);
        self.save(settings)
    }

    pub fn set_count_mode(&self, mode: CountMode) -> Settings {
        let mut settings = self.load();
        settings.count_mode = mode;
        tracing::info!("Count mode set to {:?}", mode);
        self.save(settings)
    }

    /// Override the cached number formatting for a language
    pub fn set_number_format(&self, language: &str, format: NumberFormat) -> Settings {
        let key = LanguageKey::from_tag(language);
        let mut settings = self.load();
        tracing::info!("Number formatting for '{}' set to {:?}", key, format);
        settings.number_formatting.insert(key, format);
        self.save(settings)
    }

    fn write_text(&self, text: &str) {
        drop(self.backend.write(text).trace_context());
    }
}

fn serialize(settings: &Settings) -> Result<String, PresetError> {
    let mut text = serde_json::to_string_pretty(settings)?;
    text.push('\n');
    Ok(text)
}
