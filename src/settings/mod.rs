//! Settings management
//!
//! A single JSON document holds everything the user owns:
//! - `language`: last selected language tag
//! - `presetsByLanguage`: user presets per language
//! - `disabledDefaultPresets`: default presets the user hid, per language
//! - `numberFormatting`: separators per language
//! - `countMode`: word counting mode
//!
//! Unknown fields are kept as-is.

mod backend;
mod document;
mod locale;
mod normalize;
mod store;

pub use backend::{FileBackend, MemoryBackend, SettingsBackend};
pub use document::{CountMode, NumberFormat, Settings};
pub use locale::{BuiltinLocaleTable, LocaleDefaults, fallback_number_format};
pub use normalize::normalize;
pub use store::SettingsStore;
