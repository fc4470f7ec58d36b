//! File locations
//!
//! Where the settings document and the preset catalogs live. Each location
//! can be overridden from the command line or an environment variable.

use std::path::{Path, PathBuf};

/// Overrides the configuration directory
pub const CONFIG_DIR_ENV: &str = "READSPEED_CONFIG_DIR";

/// Overrides the bundled (read-only) default presets directory
pub const BUNDLED_DIR_ENV: &str = "READSPEED_BUNDLED_PRESETS";

const APP_DIR_NAME: &str = "readspeed";
const FALLBACK_CONFIG_DIR: &str = ".readspeed";
const SETTINGS_FILE: &str = "user_settings.json";
const EDITABLE_PRESETS_DIR: &str = "presets_defaults";
const EXE_PRESETS_DIR: &str = "presets";

/// Resolved file locations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppPaths {
    /// Directory holding the settings document and editable presets
    pub config_dir: PathBuf,

    /// Read-only seed catalog shipped with the application
    pub bundled_presets_dir: PathBuf,
}

impl AppPaths {
    pub fn new(config_dir: impl Into<PathBuf>, bundled_presets_dir: impl Into<PathBuf>) -> Self {
        Self {
            config_dir: config_dir.into(),
            bundled_presets_dir: bundled_presets_dir.into(),
        }
    }

    /// Resolve locations from explicit overrides and the process environment
    ///
    /// Config directory: override > `READSPEED_CONFIG_DIR` > platform config
    /// dir > `./.readspeed`.
    ///
    /// Bundled presets: override > `READSPEED_BUNDLED_PRESETS` > `presets/`
    /// next to the executable > the crate's `assets/presets`.
    pub fn resolve(config_override: Option<PathBuf>, bundled_override: Option<PathBuf>) -> Self {
        let exe_dir = std::env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(Path::to_path_buf));
        Self::resolve_with(
            config_override,
            bundled_override,
            |name| std::env::var(name).ok(),
            dirs::config_dir(),
            exe_dir,
        )
    }

    fn resolve_with(
        config_override: Option<PathBuf>,
        bundled_override: Option<PathBuf>,
        env: impl Fn(&str) -> Option<String>,
        platform_config_dir: Option<PathBuf>,
        exe_dir: Option<PathBuf>,
    ) -> Self {
        let from_env = |name: &str| env(name).filter(|v| !v.trim().is_empty()).map(PathBuf::from);

        let config_dir = config_override
            .or_else(|| from_env(CONFIG_DIR_ENV))
            .or_else(|| platform_config_dir.map(|dir| dir.join(APP_DIR_NAME)))
            .unwrap_or_else(|| PathBuf::from(FALLBACK_CONFIG_DIR));

        let bundled_presets_dir = bundled_override
            .or_else(|| from_env(BUNDLED_DIR_ENV))
            .or_else(|| {
                exe_dir
                    .map(|dir| dir.join(EXE_PRESETS_DIR))
                    .filter(|dir| dir.is_dir())
            })
            .unwrap_or_else(|| PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/assets/presets")));

        Self {
            config_dir,
            bundled_presets_dir,
        }
    }

    /// The settings document
    pub fn settings_file(&self) -> PathBuf {
        self.config_dir.join(SETTINGS_FILE)
    }

    /// Editable copy of the default preset catalog
    pub fn editable_presets_dir(&self) -> PathBuf {
        self.config_dir.join(EDITABLE_PRESETS_DIR)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn no_env(_: &str) -> Option<String> {
        None
    }

    #[test]
    fn test_overrides_win() {
        let paths = AppPaths::resolve_with(
            Some(PathBuf::from("/cfg")),
            Some(PathBuf::from("/bundled")),
            |_| Some("/from-env".to_string()),
            Some(PathBuf::from("/platform")),
            None,
        );
        assert_eq!(paths, AppPaths::new("/cfg", "/bundled"));
        assert_eq!(paths.settings_file(), PathBuf::from("/cfg/user_settings.json"));
        assert_eq!(paths.editable_presets_dir(), PathBuf::from("/cfg/presets_defaults"));
    }

    #[test]
    fn test_env_beats_platform_dir() {
        let paths = AppPaths::resolve_with(
            None,
            None,
            |name| match name {
                CONFIG_DIR_ENV => Some("/env-cfg".to_string()),
                BUNDLED_DIR_ENV => Some("/env-bundled".to_string()),
                _ => None,
            },
            Some(PathBuf::from("/platform")),
            None,
        );
        assert_eq!(paths.config_dir, PathBuf::from("/env-cfg"));
        assert_eq!(paths.bundled_presets_dir, PathBuf::from("/env-bundled"));
    }

    #[test]
    fn test_blank_env_is_ignored() {
        let paths = AppPaths::resolve_with(
            None,
            None,
            |_| Some("  ".to_string()),
            Some(PathBuf::from("/platform")),
            None,
        );
        assert_eq!(paths.config_dir, PathBuf::from("/platform/readspeed"));
    }

    #[test]
    fn test_fallbacks() {
        let paths = AppPaths::resolve_with(None, None, no_env, None, None);
        assert_eq!(paths.config_dir, PathBuf::from(".readspeed"));
        assert!(paths.bundled_presets_dir.ends_with("assets/presets"));
    }

    #[test]
    fn test_presets_next_to_executable() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::create_dir_all(temp_dir.path().join("presets")).unwrap();

        let paths = AppPaths::resolve_with(
            None,
            None,
            no_env,
            None,
            Some(temp_dir.path().to_path_buf()),
        );
        assert_eq!(paths.bundled_presets_dir, temp_dir.path().join("presets"));

        // Missing directory is skipped
        let empty = TempDir::new().unwrap();
        let paths = AppPaths::resolve_with(None, None, no_env, None, Some(empty.path().to_path_buf()));
        assert!(paths.bundled_presets_dir.ends_with("assets/presets"));
    }

    #[test]
    fn test_bundled_assets_ship_catalog_files() {
        let paths = AppPaths::resolve_with(None, None, no_env, None, None);
        assert!(paths.bundled_presets_dir.join("defaults_presets.json").is_file());
    }
}
