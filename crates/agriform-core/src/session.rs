//! Injected session-store capability
//!
//! The original application cached the login token and the user's location
//! in ambient browser storage. Here the same persistence is an explicit,
//! injected capability: callers hand a store to whatever needs one, and
//! the engine and its tests never touch global state.
//!
//! `MemorySessionStore` is the default (and the test double); the CLI
//! ships a file-backed implementation behind the same trait.

use crate::error::Result;

/// Key under which the login token is cached.
pub const TOKEN_KEY: &str = "token";

/// Key under which the user's location is cached.
pub const LOCATION_KEY: &str = "location";

/// Simple key/value session persistence.
///
/// Implementations may fail on IO; the in-memory store never does.
pub trait SessionStore {
    /// Read the value cached under `key`, if any
    ///
    /// # Errors
    ///
    /// Returns `FormError::SessionStore` when the backing store cannot be
    /// read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Cache `value` under `key`, replacing any previous value
    ///
    /// # Errors
    ///
    /// Returns `FormError::SessionStore` when the backing store cannot be
    /// written.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Drop every cached entry
    ///
    /// # Errors
    ///
    /// Returns `FormError::SessionStore` when the backing store cannot be
    /// written.
    fn clear(&mut self) -> Result<()>;
}

/// In-memory session store.
#[derive(Debug, Clone, Default)]
pub struct MemorySessionStore {
    entries: im::HashMap<String, String>,
}

impl MemorySessionStore {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the store holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries = self.entries.update(key.to_string(), value.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        self.entries = im::HashMap::new();
        Ok(())
    }
}
