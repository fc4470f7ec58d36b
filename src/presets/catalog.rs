//! Default preset catalog
//!
//! Bundled defaults ship read-only next to the binary. On first run they are
//! copied into an editable directory the user may modify. Each catalog file
//! is resolved on its own: the editable copy wins when it holds at least one
//! usable preset, otherwise the bundled seed is used.

use std::collections::HashMap;
use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::types::{LanguageKey, Preset, presets_from_value};

/// Language-agnostic defaults file
pub const GENERAL_DEFAULTS_FILE: &str = "defaults_presets.json";

const DEFAULTS_PREFIX: &str = "defaults_presets";
const DEFAULTS_EXTENSION: &str = ".json";

/// File name of the language-specific defaults
pub fn language_defaults_file(language: &LanguageKey) -> String {
    format!("{DEFAULTS_PREFIX}_{language}{DEFAULTS_EXTENSION}")
}

/// Whether a file name is one of the default preset catalog files
pub fn is_defaults_file(file_name: &str) -> bool {
    if file_name == GENERAL_DEFAULTS_FILE {
        return true;
    }
    file_name
        .strip_prefix(DEFAULTS_PREFIX)
        .and_then(|rest| rest.strip_prefix('_'))
        .and_then(|rest| rest.strip_suffix(DEFAULTS_EXTENSION))
        .is_some_and(|lang| !lang.is_empty() && lang.chars().all(|c| c.is_ascii_alphanumeric()))
}

/// Which tier served a catalog file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Source {
    /// User-editable copy
    Editable,
    /// Read-only bundled seed
    Bundled,
}

/// Anything that can tell which presets are defaults for a language
pub trait DefaultsSource: Debug {
    /// Ordered default presets for a language
    fn defaults_for(&self, language: &LanguageKey) -> Vec<Preset>;

    fn is_default(&self, language: &LanguageKey, name: &str) -> bool {
        self.defaults_for(language).iter().any(|p| p.name == name)
    }
}

/// Two-tier catalog read from disk
#[derive(Debug, Clone)]
pub struct DefaultPresetCatalog {
    editable_dir: PathBuf,
    bundled_dir: PathBuf,
}

impl DefaultPresetCatalog {
    pub fn new(editable_dir: impl Into<PathBuf>, bundled_dir: impl Into<PathBuf>) -> Self {
        Self {
            editable_dir: editable_dir.into(),
            bundled_dir: bundled_dir.into(),
        }
    }

    pub fn editable_dir(&self) -> &Path {
        &self.editable_dir
    }

    pub fn bundled_dir(&self) -> &Path {
        &self.bundled_dir
    }

    /// General defaults followed by the language's own defaults
    ///
    /// Never fails. A name present in both halves is kept once, from the
    /// general list.
    pub fn load_combined(&self, language: &LanguageKey) -> Vec<Preset> {
        let general = self.load_file(GENERAL_DEFAULTS_FILE);
        let specific = self.load_file(&language_defaults_file(language));

        let mut combined = general;
        for preset in specific {
            if combined.iter().any(|p| p.name == preset.name) {
                tracing::debug!("Default '{}' defined twice for '{}'", preset.name, language);
            } else {
                combined.push(preset);
            }
        }
        combined
    }

    /// Resolve one catalog file through the two tiers
    ///
    /// Returns `None` when neither tier has a usable list.
    pub fn resolve(&self, file_name: &str) -> Option<(Source, Vec<Preset>)> {
        if let Some(presets) = read_list(&self.editable_dir.join(file_name)) {
            return Some((Source::Editable, presets));
        }
        read_list(&self.bundled_dir.join(file_name)).map(|presets| (Source::Bundled, presets))
    }

    fn load_file(&self, file_name: &str) -> Vec<Preset> {
        match self.resolve(file_name) {
            Some((source, presets)) => {
                tracing::debug!("Loaded {} defaults from {:?} {}", presets.len(), source, file_name);
                presets
            }
            None => Vec::new(),
        }
    }

    /// Copy bundled catalog files into the editable directory
    ///
    /// Files already present in the editable directory are never touched.
    /// Returns the names of the files copied by this call.
    pub fn ensure_seeded(&self) -> Vec<String> {
        let entries = match fs::read_dir(&self.bundled_dir) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!("Cannot read bundled presets {:?}: {}", self.bundled_dir, e);
                return Vec::new();
            }
        };

        if let Err(e) = fs::create_dir_all(&self.editable_dir) {
            tracing::error!("Cannot create preset directory {:?}: {}", self.editable_dir, e);
            return Vec::new();
        }

        let mut copied = Vec::new();
        for entry in entries.flatten() {
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                continue;
            };
            if !is_defaults_file(&name) {
                continue;
            }
            let target = self.editable_dir.join(&name);
            if target.exists() {
                continue;
            }
            match fs::copy(entry.path(), &target) {
                Ok(_) => {
                    tracing::info!("Seeded default presets file {}", name);
                    copied.push(name);
                }
                Err(e) => tracing::warn!("Failed to seed {}: {}", name, e),
            }
        }
        copied.sort();
        copied
    }
}

impl DefaultsSource for DefaultPresetCatalog {
    fn defaults_for(&self, language: &LanguageKey) -> Vec<Preset> {
        self.load_combined(language)
    }
}

/// Read a preset list, `None` when missing, unreadable, malformed or empty
fn read_list(path: &Path) -> Option<Vec<Preset>> {
    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!("Failed to read defaults file {:?}: {}", path, e);
            return None;
        }
    };
    let value = match serde_json::from_str(&content) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Failed to parse defaults file {:?}: {}", path, e);
            return None;
        }
    };
    let presets = presets_from_value(value);
    if presets.is_empty() { None } else { Some(presets) }
}

/// In-memory catalog
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    general: Vec<Preset>,
    by_language: HashMap<LanguageKey, Vec<Preset>>,
}

impl StaticCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_general(mut self, presets: Vec<Preset>) -> Self {
        self.general = presets;
        self
    }

    pub fn with_language(mut self, language: &str, presets: Vec<Preset>) -> Self {
        self.by_language.insert(LanguageKey::from_tag(language), presets);
        self
    }
}

impl DefaultsSource for StaticCatalog {
    fn defaults_for(&self, language: &LanguageKey) -> Vec<Preset> {
        let mut combined = self.general.clone();
        for preset in self.by_language.get(language).into_iter().flatten() {
            if !combined.iter().any(|p| p.name == preset.name) {
                combined.push(preset.clone());
            }
        }
        combined
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    struct Dirs {
        _root: TempDir,
        editable: PathBuf,
        bundled: PathBuf,
    }

    fn dirs() -> Dirs {
        let root = TempDir::new().unwrap();
        let editable = root.path().join("editable");
        let bundled = root.path().join("bundled");
        fs::create_dir_all(&bundled).unwrap();
        Dirs {
            editable,
            bundled,
            _root: root,
        }
    }

    fn names(presets: &[Preset]) -> Vec<&str> {
        presets.iter().map(|p| p.name.as_str()).collect()
    }

    #[test]
    fn test_is_defaults_file() {
        assert!(is_defaults_file("defaults_presets.json"));
        assert!(is_defaults_file("defaults_presets_en.json"));
        assert!(!is_defaults_file("defaults_presets_.json"));
        assert!(!is_defaults_file("defaults_presets_en.json.bak"));
        assert!(!is_defaults_file("user_settings.json"));
        assert!(!is_defaults_file("defaults_presets_e-n.json"));
    }

    #[test]
    fn test_language_defaults_file() {
        assert_eq!(
            language_defaults_file(&LanguageKey::from_tag("en-US")),
            "defaults_presets_en.json"
        );
    }

    #[test]
    fn test_combined_uses_bundled_when_no_editable() {
        let d = dirs();
        fs::write(d.bundled.join(GENERAL_DEFAULTS_FILE), r#"[{"name": "Slow", "wpm": 150}]"#).unwrap();
        fs::write(d.bundled.join("defaults_presets_en.json"), r#"[{"name": "Fast", "wpm": 400}]"#).unwrap();

        let catalog = DefaultPresetCatalog::new(&d.editable, &d.bundled);
        let combined = catalog.load_combined(&LanguageKey::from_tag("en"));
        assert_eq!(names(&combined), vec!["Slow", "Fast"]);

        let only_general = catalog.load_combined(&LanguageKey::from_tag("de"));
        assert_eq!(names(&only_general), vec!["Slow"]);
    }

    #[test]
    fn test_editable_overrides_each_half_independently() {
        let d = dirs();
        fs::create_dir_all(&d.editable).unwrap();
        fs::write(d.bundled.join(GENERAL_DEFAULTS_FILE), r#"[{"name": "Slow", "wpm": 150}]"#).unwrap();
        fs::write(d.bundled.join("defaults_presets_en.json"), r#"[{"name": "Fast", "wpm": 400}]"#).unwrap();
        fs::write(d.editable.join(GENERAL_DEFAULTS_FILE), r#"[{"name": "Relaxed", "wpm": 120}]"#).unwrap();

        let catalog = DefaultPresetCatalog::new(&d.editable, &d.bundled);
        assert_eq!(
            names(&catalog.load_combined(&LanguageKey::from_tag("en"))),
            vec!["Relaxed", "Fast"]
        );
        assert_eq!(catalog.resolve(GENERAL_DEFAULTS_FILE).unwrap().0, Source::Editable);
        assert_eq!(catalog.resolve("defaults_presets_en.json").unwrap().0, Source::Bundled);
    }

    #[test]
    fn test_empty_or_broken_editable_falls_back() {
        let d = dirs();
        fs::create_dir_all(&d.editable).unwrap();
        fs::write(d.bundled.join(GENERAL_DEFAULTS_FILE), r#"[{"name": "Slow", "wpm": 150}]"#).unwrap();
        fs::write(d.bundled.join("defaults_presets_en.json"), r#"[{"name": "Fast", "wpm": 400}]"#).unwrap();
        fs::write(d.editable.join(GENERAL_DEFAULTS_FILE), "[]").unwrap();
        fs::write(d.editable.join("defaults_presets_en.json"), "{oops").unwrap();

        let catalog = DefaultPresetCatalog::new(&d.editable, &d.bundled);
        assert_eq!(
            names(&catalog.load_combined(&LanguageKey::from_tag("en"))),
            vec!["Slow", "Fast"]
        );
    }

    #[test]
    fn test_missing_everything_yields_empty() {
        let d = dirs();
        let catalog = DefaultPresetCatalog::new(&d.editable, d.bundled.join("missing"));
        assert!(catalog.load_combined(&LanguageKey::from_tag("en")).is_empty());
        assert!(catalog.resolve(GENERAL_DEFAULTS_FILE).is_none());
        assert!(catalog.ensure_seeded().is_empty());
    }

    #[test]
    fn test_duplicate_names_keep_general() {
        let d = dirs();
        fs::write(d.bundled.join(GENERAL_DEFAULTS_FILE), r#"[{"name": "Fast", "wpm": 350}]"#).unwrap();
        fs::write(d.bundled.join("defaults_presets_en.json"), r#"[{"name": "Fast", "wpm": 400}]"#).unwrap();

        let catalog = DefaultPresetCatalog::new(&d.editable, &d.bundled);
        let combined = catalog.load_combined(&LanguageKey::from_tag("en"));
        assert_eq!(combined.len(), 1);
        assert_eq!(combined[0].wpm(), Some(350.0));
        assert!(catalog.is_default(&LanguageKey::from_tag("en"), "Fast"));
        assert!(!catalog.is_default(&LanguageKey::from_tag("en"), "Slow"));
    }

    #[test]
    fn test_ensure_seeded_copies_once_and_never_overwrites() {
        let d = dirs();
        fs::write(d.bundled.join(GENERAL_DEFAULTS_FILE), r#"[{"name": "Slow", "wpm": 150}]"#).unwrap();
        fs::write(d.bundled.join("defaults_presets_en.json"), r#"[{"name": "Fast", "wpm": 400}]"#).unwrap();
        fs::write(d.bundled.join("README.txt"), "not a catalog").unwrap();

        let catalog = DefaultPresetCatalog::new(&d.editable, &d.bundled);
        assert_eq!(
            catalog.ensure_seeded(),
            vec!["defaults_presets.json".to_string(), "defaults_presets_en.json".to_string()]
        );
        assert!(!d.editable.join("README.txt").exists());

        // User edits the seeded copy
        fs::write(d.editable.join("defaults_presets_en.json"), r#"[{"name": "Turbo", "wpm": 600}]"#).unwrap();
        assert!(catalog.ensure_seeded().is_empty());
        assert_eq!(
            fs::read_to_string(d.editable.join("defaults_presets_en.json")).unwrap(),
            r#"[{"name": "Turbo", "wpm": 600}]"#
        );
        assert_eq!(
            names(&catalog.load_combined(&LanguageKey::from_tag("en"))),
            vec!["Slow", "Turbo"]
        );
    }

    #[test]
    fn test_static_catalog() {
        let catalog = StaticCatalog::new()
            .with_general(vec![Preset::new("Slow", 150)])
            .with_language("en", vec![Preset::new("Fast", 400), Preset::new("Slow", 999)]);

        let en = catalog.defaults_for(&LanguageKey::from_tag("en-GB"));
        assert_eq!(names(&en), vec!["Slow", "Fast"]);
        assert_eq!(names(&catalog.defaults_for(&LanguageKey::from_tag("fr"))), vec!["Slow"]);
    }
}
