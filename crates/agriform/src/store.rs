//! File-backed session store
//!
//! Persists the session key/value map as one JSON object. The whole map is
//! read and rewritten per operation; session data is a handful of short
//! strings, so simplicity wins over incremental IO.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use agriform_core::{FormError, Result, SessionStore};

/// `SessionStore` persisting to a JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    /// Open a store backed by the given file. The file is created lazily
    /// on first write.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The platform-default session file path.
    ///
    /// # Errors
    ///
    /// Returns `FormError::SessionStore` when no home directory can be
    /// resolved.
    pub fn default_path() -> Result<PathBuf> {
        directories::ProjectDirs::from("", "", "agriform")
            .map(|dirs| dirs.data_dir().join("session.json"))
            .ok_or_else(|| {
                FormError::session_store("failed to determine a data directory for the session file")
            })
    }

    /// The backing file path
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<BTreeMap<String, String>> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let raw = std::fs::read_to_string(&self.path).map_err(|e| {
            FormError::session_store(format!("failed to read {}: {e}", self.path.display()))
        })?;
        serde_json::from_str(&raw).map_err(|e| {
            FormError::session_store(format!("corrupt session file {}: {e}", self.path.display()))
        })
    }

    fn write_map(&self, map: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| {
                FormError::session_store(format!("failed to create {}: {e}", parent.display()))
            })?;
        }
        let raw = serde_json::to_string_pretty(map)
            .map_err(|e| FormError::session_store(format!("failed to encode session: {e}")))?;
        std::fs::write(&self.path, raw).map_err(|e| {
            FormError::session_store(format!("failed to write {}: {e}", self.path.display()))
        })
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.read_map()?.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let mut map = self.read_map()?;
        map.insert(key.to_string(), value.to_string());
        self.write_map(&map)
    }

    fn clear(&mut self) -> Result<()> {
        if self.path.exists() {
            std::fs::remove_file(&self.path).map_err(|e| {
                FormError::session_store(format!("failed to remove {}: {e}", self.path.display()))
            })?;
        }
        Ok(())
    }
}
