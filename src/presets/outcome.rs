//! Results of preset operations

use serde::Serialize;

use crate::types::Preset;

/// What a delete did to a `(language, name)` pair
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteAction {
    /// User preset removed and the default it shadowed hidden
    DeletedAndIgnored,
    /// User preset with no default counterpart removed
    DeletedCustom,
    /// Default hidden, no user preset involved
    IgnoredDefault,
}

impl DeleteAction {
    pub fn as_str(self) -> &'static str {
        match self {
            DeleteAction::DeletedAndIgnored => "deleted_and_ignored",
            DeleteAction::DeletedCustom => "deleted_custom",
            DeleteAction::IgnoredDefault => "ignored_default",
        }
    }

    /// Question shown before performing this action
    pub fn confirm_message(self, name: &str) -> String {
        match self {
            DeleteAction::DeletedAndIgnored => {
                format!("Delete your version of '{name}' and hide the default preset?")
            }
            DeleteAction::DeletedCustom => format!("Delete preset '{name}'?"),
            DeleteAction::IgnoredDefault => format!("Hide the default preset '{name}'?"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteOutcome {
    pub action: DeleteAction,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EditOutcome {
    /// Always `"edited"`
    pub action: &'static str,
    /// Effect on the original name, `None` if it did not exist
    pub deleted_action: Option<DeleteAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RestoreOutcome {
    /// User presets removed because they shadowed a default
    pub removed_custom: Vec<String>,
    /// Default names no longer hidden
    pub unignored: Vec<String>,
}

impl RestoreOutcome {
    pub fn is_noop(&self) -> bool {
        self.removed_custom.is_empty() && self.unignored.is_empty()
    }
}

/// Observable state of a preset name within one language
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PresetState {
    /// Catalog default shown as shipped
    ActiveDefault,
    /// User preset shown in place of a default
    Overridden,
    /// Default hidden by the user (wins over an override)
    Suppressed,
    /// User preset with no default counterpart
    Custom,
}

/// A preset as it should be presented, with the state that produced it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectivePreset {
    pub state: PresetState,
    #[serde(flatten)]
    pub preset: Preset,
}
