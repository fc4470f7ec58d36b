//! Shared types
//!
//! Language keys, the preset record, file locations and the error taxonomy
//! used across the crate.

mod config;
mod error;
mod language;
mod preset;

pub use config::{AppPaths, BUNDLED_DIR_ENV, CONFIG_DIR_ENV};
pub use error::{ErrorCode, PresetError, Result};
pub use language::{DEFAULT_LANGUAGE, LanguageKey, normalize_language_tag};
pub use preset::{Preset, presets_from_value};
