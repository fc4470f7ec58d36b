//! Reading speed presets
//!
//! Preset resolution and settings persistence for a reading-speed utility.
//!
//! ## Features
//!
//! - One normalized JSON settings document, re-read on every access
//! - Two-tier default preset catalog (editable copy over bundled seed)
//! - Create / edit / delete / restore-defaults per language, with hidden
//!   defaults tracked separately from user presets
//!
//! ## Quick Start
//!
//! ```no_run
//! use readspeed_presets::{DefaultPresetCatalog, Preset, PresetResolver, SettingsStore};
//!
//! let catalog = DefaultPresetCatalog::new("config/presets_defaults", "assets/presets");
//! catalog.ensure_seeded();
//!
//! let resolver = PresetResolver::new(SettingsStore::open("config/user_settings.json"), catalog);
//! resolver.create("en", Preset::new("Sprint", 520))?;
//! let outcome = resolver.delete("en", "Fast")?;
//! println!("{}", outcome.action.as_str());
//! # Ok::<(), readspeed_presets::PresetError>(())
//! ```
//!
//! ## Environment Variables
//!
//! - `READSPEED_CONFIG_DIR`: settings and editable presets directory
//! - `READSPEED_BUNDLED_PRESETS`: bundled default presets directory
//! - `RUST_LOG`: log filter for the binary

pub mod bridge;
pub mod cli;
pub mod presets;
pub mod runner;
pub mod settings;
pub mod tracing;
pub mod types;

pub use bridge::{ChangeBroadcaster, Confirmer};
pub use cli::Cli;
pub use presets::{
    DefaultPresetCatalog, DeleteAction, EffectivePreset, PresetResolver, PresetState,
};
pub use runner::{Engine, run_with_cli};
pub use settings::{Settings, SettingsStore};
pub use types::{AppPaths, LanguageKey, Preset, PresetError, Result};
