//! Preset resolver
//!
//! Applies create / edit / delete / restore-defaults to the user's presets
//! for one language, reconciling them with the default catalog.
//!
//! Defaults are never modified. Hiding a default is recorded in
//! `disabledDefaultPresets`, so restoring defaults only needs the current
//! catalog and the stored flags.
//!
//! Every operation reloads the document from the store, so concurrent edits
//! made by another window are picked up (last write wins).

use std::collections::HashSet;

use super::catalog::DefaultsSource;
use super::outcome::{
    DeleteAction, DeleteOutcome, EditOutcome, EffectivePreset, PresetState, RestoreOutcome,
};
use crate::bridge::{AlwaysConfirm, ChangeBroadcaster, Confirmer, NullBroadcaster};
use crate::settings::{Settings, SettingsStore};
use crate::types::{LanguageKey, Preset, PresetError, Result};

#[derive(Debug)]
pub struct PresetResolver {
    store: SettingsStore,
    catalog: Box<dyn DefaultsSource>,
    confirmer: Box<dyn Confirmer>,
    broadcaster: Box<dyn ChangeBroadcaster>,
}

impl PresetResolver {
    /// Resolver that confirms everything and broadcasts nowhere
    pub fn new(store: SettingsStore, catalog: impl DefaultsSource + 'static) -> Self {
        Self {
            store,
            catalog: Box::new(catalog),
            confirmer: Box::new(AlwaysConfirm),
            broadcaster: Box::new(NullBroadcaster),
        }
    }

    pub fn with_confirmer(mut self, confirmer: impl Confirmer + 'static) -> Self {
        self.confirmer = Box::new(confirmer);
        self
    }

    pub fn with_broadcaster(mut self, broadcaster: impl ChangeBroadcaster + 'static) -> Self {
        self.broadcaster = Box::new(broadcaster);
        self
    }

    pub fn store(&self) -> &SettingsStore {
        &self.store
    }

    /// Observers told about every committed change
    pub fn broadcaster(&self) -> &dyn ChangeBroadcaster {
        &*self.broadcaster
    }

    /// Add a preset, replacing any user preset with the same name
    ///
    /// Hidden defaults are left alone.
    pub fn create(&self, language: &str, preset: Preset) -> Result<Settings> {
        require_name(&preset.name)?;
        let key = LanguageKey::from_tag(language);
        let mut settings = self.store.load();

        let replaced = settings.upsert_preset(&key, preset);
        tracing::info!(language = %key, replaced, "Preset saved");
        Ok(self.commit(settings))
    }

    /// Delete a preset or hide a default
    pub fn delete(&self, language: &str, name: &str) -> Result<DeleteOutcome> {
        require_name(name)?;
        let key = LanguageKey::from_tag(language);
        let mut settings = self.store.load();

        let action = self
            .plan_delete(&settings, &key, name)
            .ok_or_else(|| PresetError::not_found(name))?;
        self.confirm(&action.confirm_message(name))?;

        apply_delete(&mut settings, &key, name, action);
        tracing::info!(language = %key, name, action = action.as_str(), "Preset deleted");
        self.commit(settings);
        Ok(DeleteOutcome { action })
    }

    /// Replace `original_name` with `preset`
    ///
    /// The original goes through the same logic as [`delete`](Self::delete),
    /// then `preset` is upserted by its own name. Same name means an in-place
    /// update; a different name is a rename.
    pub fn edit(&self, language: &str, original_name: &str, preset: Preset) -> Result<EditOutcome> {
        require_name(original_name)?;
        require_name(&preset.name)?;
        let key = LanguageKey::from_tag(language);
        let mut settings = self.store.load();

        let deleted_action = self.plan_delete(&settings, &key, original_name);
        let message = if preset.name == original_name {
            format!("Save changes to preset '{original_name}'?")
        } else {
            format!("Replace preset '{}' with '{}'?", original_name, preset.name)
        };
        self.confirm(&message)?;

        if let Some(action) = deleted_action {
            apply_delete(&mut settings, &key, original_name, action);
        }
        // Upsert against the already-mutated list so a same-name edit cannot duplicate
        let new_name = preset.name.clone();
        settings.upsert_preset(&key, preset);
        tracing::info!(
            language = %key,
            original = original_name,
            name = %new_name,
            deleted_action = deleted_action.map(DeleteAction::as_str),
            "Preset edited"
        );
        self.commit(settings);
        Ok(EditOutcome {
            action: "edited",
            deleted_action,
        })
    }

    /// Drop user presets that shadow defaults and un-hide every hidden default
    ///
    /// Custom presets (names not in the catalog) are kept. Running it twice
    /// is a no-op the second time.
    pub fn restore_defaults(&self, language: &str) -> Result<RestoreOutcome> {
        let key = LanguageKey::from_tag(language);
        self.confirm(&format!("Restore the default presets for '{key}'?"))?;

        let mut settings = self.store.load();
        let defaults = self.catalog.defaults_for(&key);
        let default_names: HashSet<&str> = defaults.iter().map(|p| p.name.as_str()).collect();

        let mut outcome = RestoreOutcome::default();
        if let Some(presets) = settings.presets_by_language.get_mut(&key) {
            presets.retain(|p| {
                let shadows = default_names.contains(p.name.as_str());
                if shadows {
                    outcome.removed_custom.push(p.name.clone());
                }
                !shadows
            });
        }
        if let Some(names) = settings.disabled_default_presets.get_mut(&key) {
            names.retain(|name| {
                let matches = default_names.contains(name.as_str());
                if matches {
                    outcome.unignored.push(name.clone());
                }
                !matches
            });
        }
        settings.prune_disabled();

        tracing::info!(
            language = %key,
            removed_custom = outcome.removed_custom.len(),
            unignored = outcome.unignored.len(),
            "Default presets restored"
        );
        self.commit(settings);
        Ok(outcome)
    }

    /// Presets as they should be presented for a language
    ///
    /// Catalog order first (override replaces the default, hidden defaults
    /// are skipped), then custom presets in user order.
    pub fn effective_presets(&self, language: &str) -> Vec<EffectivePreset> {
        let key = LanguageKey::from_tag(language);
        let settings = self.store.load();
        let defaults = self.catalog.defaults_for(&key);

        let mut effective = Vec::new();
        for default in &defaults {
            if settings.is_disabled(&key, &default.name) {
                continue;
            }
            let entry = match settings.find_preset(&key, &default.name) {
                Some(user) => EffectivePreset {
                    state: PresetState::Overridden,
                    preset: user.clone(),
                },
                None => EffectivePreset {
                    state: PresetState::ActiveDefault,
                    preset: default.clone(),
                },
            };
            effective.push(entry);
        }
        for user in settings.presets_for(&key) {
            if defaults.iter().any(|d| d.name == user.name) {
                continue;
            }
            effective.push(EffectivePreset {
                state: PresetState::Custom,
                preset: user.clone(),
            });
        }
        effective
    }

    /// State of one name, `None` if it is neither a default nor a user preset
    pub fn preset_state(&self, language: &str, name: &str) -> Option<PresetState> {
        let key = LanguageKey::from_tag(language);
        let settings = self.store.load();
        let is_default = self.catalog.is_default(&key, name);
        let has_user = settings.find_preset(&key, name).is_some();

        match (is_default, has_user) {
            (true, _) if settings.is_disabled(&key, name) => Some(PresetState::Suppressed),
            (true, true) => Some(PresetState::Overridden),
            (true, false) => Some(PresetState::ActiveDefault),
            (false, true) => Some(PresetState::Custom),
            (false, false) => None,
        }
    }

    fn plan_delete(&self, settings: &Settings, key: &LanguageKey, name: &str) -> Option<DeleteAction> {
        let has_user = settings.find_preset(key, name).is_some();
        let is_default = self.catalog.is_default(key, name);
        match (has_user, is_default) {
            (true, true) => Some(DeleteAction::DeletedAndIgnored),
            (true, false) => Some(DeleteAction::DeletedCustom),
            (false, true) => Some(DeleteAction::IgnoredDefault),
            (false, false) => None,
        }
    }

    fn confirm(&self, message: &str) -> Result<()> {
        if self.confirmer.confirm(message) {
            Ok(())
        } else {
            tracing::debug!("User declined: {}", message);
            Err(PresetError::Cancelled)
        }
    }

    /// Persist, then notify observers with what was actually written
    fn commit(&self, settings: Settings) -> Settings {
        let saved = self.store.save(settings);
        self.broadcaster.notify(&saved);
        saved
    }
}

fn apply_delete(settings: &mut Settings, key: &LanguageKey, name: &str, action: DeleteAction) {
    match action {
        DeleteAction::DeletedAndIgnored => {
            settings.remove_preset(key, name);
            settings.disable_default(key, name);
        }
        DeleteAction::DeletedCustom => {
            settings.remove_preset(key, name);
        }
        DeleteAction::IgnoredDefault => {
            settings.disable_default(key, name);
        }
    }
}

fn require_name(name: &str) -> Result<()> {
    if name.trim().is_empty() {
        Err(PresetError::NoSelection)
    } else {
        Ok(())
    }
}
