//! Persistence of the signed-in user and bearer token.
//!
//! The stored document is the user profile with the token merged in:
//! `{ "_id": ..., "email": ..., ..., "token": "..." }`.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::SessionError;
use crate::api::SessionUser;

/// The persisted session: profile fields plus token.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredSession {
    #[serde(flatten)]
    pub user: SessionUser,
    pub token: String,
}

impl StoredSession {
    #[must_use]
    pub const fn new(user: SessionUser, token: String) -> Self {
        Self { user, token }
    }
}

impl std::fmt::Debug for StoredSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoredSession")
            .field("user", &self.user)
            .field("token", &"[REDACTED]")
            .finish()
    }
}

/// Storage for the single session record.
///
/// Calls are synchronous so the API client can read the token while
/// building a request.
pub trait SessionStore: Send + Sync {
    /// Read the stored session, `None` when logged out.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Corrupt` if a value exists but cannot be parsed.
    fn load(&self) -> Result<Option<StoredSession>, SessionError>;

    /// Replace the stored session.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the value cannot be written.
    fn save(&self, session: &StoredSession) -> Result<(), SessionError>;

    /// Remove the stored session. Clearing an empty store succeeds.
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Io` if the value cannot be removed.
    fn clear(&self) -> Result<(), SessionError>;
}

// =============================================================================
// File store
// =============================================================================

/// Session kept in one JSON file.
#[derive(Debug, Clone)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(std::ffi::OsStr::to_os_string)
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SessionStore for FileSessionStore {
    fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        let json = serde_json::to_vec_pretty(session)?;
        let temp = self.temp_path();

        if let Some(dir) = self.path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)?;
        }

        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options.open(&temp)?;
        file.write_all(&json)?;
        file.sync_all()?;
        drop(file);

        fs::rename(&temp, &self.path)?;
        debug!(path = %self.path.display(), "Session saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        match fs::remove_file(&self.path) {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session cleared");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

// =============================================================================
// Memory store
// =============================================================================

/// In-process session store, for tests and embedding.
///
/// Holds the serialized JSON so corrupt values can be simulated.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    raw: Mutex<Option<String>>,
}

impl MemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a raw value as-is, bypassing serialization.
    pub fn set_raw(&self, raw: impl Into<String>) {
        *self.lock() = Some(raw.into());
    }

    /// The raw stored value.
    #[must_use]
    pub fn raw(&self) -> Option<String> {
        self.lock().clone()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Option<String>> {
        // A poisoned lock still holds a complete value.
        self.raw
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl SessionStore for MemorySessionStore {
    fn load(&self) -> Result<Option<StoredSession>, SessionError> {
        self.lock()
            .as_deref()
            .map(serde_json::from_str)
            .transpose()
            .map_err(SessionError::from)
    }

    fn save(&self, session: &StoredSession) -> Result<(), SessionError> {
        let raw = serde_json::to_string(session)?;
        *self.lock() = Some(raw);
        Ok(())
    }

    fn clear(&self) -> Result<(), SessionError> {
        *self.lock() = None;
        Ok(())
    }
}
