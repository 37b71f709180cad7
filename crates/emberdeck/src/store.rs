use anyhow::Result;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

const FILENAME: &str = "state.yaml";
const APP_DIR: &str = "emberdeck";

/// Keys written to the persisted store.
pub mod keys {
    pub const CURRENT_SLIDE: &str = "current_slide";
    pub const PASSWORD: &str = "slides_password";
    pub const AUTHENTICATED: &str = "slides_authenticated";
    pub const THEME: &str = "theme";
    pub const FULLSCREEN_DISMISSED: &str = "fullscreen_dismissed";
    pub const LIGHT_MODE_DISMISSED: &str = "light_mode_dismissed";
}

/// A flat string-to-string store. Readers must tolerate missing keys.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
    fn remove(&mut self, key: &str);

    /// True only when the key holds the literal `"true"`.
    fn flag(&self, key: &str) -> bool {
        self.get(key).as_deref() == Some("true")
    }

    fn set_flag(&mut self, key: &str) {
        self.set(key, "true");
    }
}

/// In-memory store, used by tests and as a fallback when the data
/// directory cannot be resolved.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with(entries: &[(&str, &str)]) -> Self {
        Self {
            entries: entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    fn remove(&mut self, key: &str) {
        self.entries.remove(key);
    }
}

/// YAML-backed store. Every mutation rewrites the file synchronously;
/// there is no locking, so two running instances race and the last
/// write wins.
#[derive(Debug)]
pub struct FileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl FileStore {
    pub fn path() -> Result<PathBuf> {
        dirs::data_dir()
            .map(|d| d.join(APP_DIR).join(FILENAME))
            .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))
    }

    pub fn open() -> Result<Self> {
        let path = Self::path()?;
        Ok(Self::open_at(path))
    }

    /// Open the store at `path`. A missing file is an empty store; a
    /// corrupt one is logged and treated as empty.
    pub fn open_at(path: PathBuf) -> Self {
        let entries = match std::fs::read_to_string(&path) {
            Ok(contents) => match serde_yaml::from_str::<BTreeMap<String, String>>(&contents) {
                Ok(map) => map,
                Err(e) => {
                    tracing::warn!(path = %path.display(), "ignoring unreadable state file: {e}");
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                tracing::warn!(path = %path.display(), "failed to read state file: {e}");
                BTreeMap::new()
            }
        };
        Self { path, entries }
    }

    pub fn location(&self) -> &Path {
        &self.path
    }

    pub fn persist(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let yaml = serde_yaml::to_string(&self.entries)?;
        std::fs::write(&self.path, yaml)?;
        Ok(())
    }

    fn persist_or_warn(&self) {
        if let Err(e) = self.persist() {
            tracing::warn!(path = %self.path.display(), "failed to save state: {e}");
        }
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        if self.entries.get(key).map(String::as_str) == Some(value) {
            return;
        }
        self.entries.insert(key.to_string(), value.to_string());
        self.persist_or_warn();
    }

    fn remove(&mut self, key: &str) {
        if self.entries.remove(key).is_some() {
            self.persist_or_warn();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_flags() {
        let mut store = MemoryStore::new();
        assert!(!store.flag(keys::FULLSCREEN_DISMISSED));
        store.set_flag(keys::FULLSCREEN_DISMISSED);
        assert!(store.flag(keys::FULLSCREEN_DISMISSED));
        store.set(keys::FULLSCREEN_DISMISSED, "yes");
        assert!(!store.flag(keys::FULLSCREEN_DISMISSED));
        store.remove(keys::FULLSCREEN_DISMISSED);
        assert_eq!(store.get(keys::FULLSCREEN_DISMISSED), None);
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join(FILENAME);

        let mut store = FileStore::open_at(path.clone());
        store.set(keys::CURRENT_SLIDE, "4");
        store.set(keys::THEME, "light");
        store.remove(keys::THEME);

        let reopened = FileStore::open_at(path);
        assert_eq!(reopened.get(keys::CURRENT_SLIDE).as_deref(), Some("4"));
        assert_eq!(reopened.get(keys::THEME), None);
    }

    #[test]
    fn test_file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open_at(dir.path().join(FILENAME));
        assert_eq!(store.get(keys::PASSWORD), None);
    }

    #[test]
    fn test_file_store_corrupt_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(FILENAME);
        std::fs::write(&path, "- not\n- a map\n").unwrap();

        let store = FileStore::open_at(path);
        assert_eq!(store.get(keys::CURRENT_SLIDE), None);
    }
}
