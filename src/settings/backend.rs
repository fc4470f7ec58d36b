//! Storage backends for the settings document

use std::cell::RefCell;
use std::fmt::Debug;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// Raw storage for the serialized settings document
pub trait SettingsBackend: Debug {
    /// Read the stored text, `Ok(None)` when nothing has been stored yet
    fn read(&self) -> io::Result<Option<String>>;

    /// Replace the stored text
    fn write(&self, contents: &str) -> io::Result<()>;

    /// Keep a copy of unparsable text before it gets replaced
    fn backup(&self, contents: &str) -> io::Result<()>;
}

/// Settings stored in a JSON file on local disk
#[derive(Debug, Clone)]
pub struct FileBackend {
    path: PathBuf,
}

impl FileBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn backup_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".bak");
        PathBuf::from(name)
    }
}

impl SettingsBackend for FileBackend {
    fn read(&self) -> io::Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Atomic: write a sibling `.tmp` file, then rename over the target
    fn write(&self, contents: &str) -> io::Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp_path = PathBuf::from(tmp_name);

        fs::write(&tmp_path, contents)?;
        if let Err(e) = fs::rename(&tmp_path, &self.path) {
            drop(fs::remove_file(&tmp_path));
            return Err(e);
        }
        Ok(())
    }

    /// Writes `<file>.bak`, replacing an older backup
    fn backup(&self, contents: &str) -> io::Result<()> {
        let backup_path = self.backup_path();
        fs::write(&backup_path, contents)?;
        tracing::warn!("Saved unreadable settings to {:?}", backup_path);
        Ok(())
    }
}

/// Settings kept in memory only
#[derive(Debug, Default)]
pub struct MemoryBackend {
    contents: RefCell<Option<String>>,
    backup: RefCell<Option<String>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with existing document text
    pub fn with_contents(contents: impl Into<String>) -> Self {
        Self {
            contents: RefCell::new(Some(contents.into())),
            backup: RefCell::default(),
        }
    }

    /// Current stored text
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }

    /// Last text handed to [`SettingsBackend::backup`]
    pub fn backup_contents(&self) -> Option<String> {
        self.backup.borrow().clone()
    }
}

impl SettingsBackend for MemoryBackend {
    fn read(&self) -> io::Result<Option<String>> {
        Ok(self.contents.borrow().clone())
    }

    fn write(&self, contents: &str) -> io::Result<()> {
        *self.contents.borrow_mut() = Some(contents.to_string());
        Ok(())
    }

    fn backup(&self, contents: &str) -> io::Result<()> {
        *self.backup.borrow_mut() = Some(contents.to_string());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_file_backend_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let backend = FileBackend::new(temp_dir.path().join("user_settings.json"));
        assert!(backend.read().unwrap().is_none());
    }

    #[test]
    fn test_file_backend_write_creates_parent_and_leaves_no_tmp() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("user_settings.json");
        let backend = FileBackend::new(&path);

        backend.write("{\"language\":\"en\"}").unwrap();
        assert_eq!(
            backend.read().unwrap().as_deref(),
            Some("{\"language\":\"en\"}")
        );
        assert!(!temp_dir.path().join("nested").join("user_settings.json.tmp").exists());

        backend.write("{}").unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "{}");
    }

    #[test]
    fn test_file_backend_read_error_propagates() {
        let temp_dir = TempDir::new().unwrap();
        // A directory cannot be read as a file
        let backend = FileBackend::new(temp_dir.path());
        assert!(backend.read().is_err());
    }

    #[test]
    fn test_file_backend_backup_sits_next_to_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("user_settings.json");
        let backend = FileBackend::new(&path);

        backend.backup("{broken").unwrap();
        assert_eq!(
            backend.backup_path(),
            temp_dir.path().join("user_settings.json.bak")
        );
        assert_eq!(fs::read_to_string(backend.backup_path()).unwrap(), "{broken");
        assert!(!path.exists());
    }

    #[test]
    fn test_memory_backend() {
        let backend = MemoryBackend::new();
        assert!(backend.read().unwrap().is_none());
        backend.write("{}").unwrap();
        assert_eq!(backend.contents().as_deref(), Some("{}"));

        let backend = MemoryBackend::with_contents("[]");
        assert_eq!(backend.read().unwrap().as_deref(), Some("[]"));
        backend.backup("[]").unwrap();
        assert_eq!(backend.backup_contents().as_deref(), Some("[]"));
    }
}
