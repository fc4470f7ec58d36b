//! Reading speed presets
//!
//! Three sources make up what the user sees for a language:
//! - the default catalog (bundled files, optionally edited by the user)
//! - user presets in `presetsByLanguage`
//! - hidden default names in `disabledDefaultPresets`
//!
//! Precedence: hidden > user override > default.

mod catalog;
mod outcome;
mod resolver;

pub use catalog::{
    DefaultPresetCatalog, DefaultsSource, GENERAL_DEFAULTS_FILE, Source, StaticCatalog,
    is_defaults_file, language_defaults_file,
};
pub use outcome::{
    DeleteAction, DeleteOutcome, EditOutcome, EffectivePreset, PresetState, RestoreOutcome,
};
pub use resolver::PresetResolver;
