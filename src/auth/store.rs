//! Persisted session slots.
//!
//! The token slot is the single shared resource of the client: login and
//! registration write it, every guarded check and outbound request reads it,
//! and logout, account deletion, or a 401 response clears it. The store
//! performs no validation of its own; it is a dumb persisted slot with a
//! cookie-like retention window.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::api::models::DisplayUser;

/// Retention window for the persisted token. Matches the cookie lifetime
/// the web console used. The token's own `exp` claim, not this window, is
/// the authority for session validity.
pub const TOKEN_RETENTION_DAYS: i64 = 7;

const TOKEN_FILE: &str = "session.json";
const DISPLAY_FILE: &str = "user.json";

/// Read/write access to the persisted bearer token.
///
/// Implementations hold at most one token; `set` overwrites any prior value
/// and `remove` is an idempotent no-op when nothing is stored. Every read
/// goes back to the underlying storage, so a token rotated or cleared by a
/// concurrent flow (another process, a 401 handler) is observed on the very
/// next check.
pub trait TokenStore: Send + Sync {
    fn set(&self, token: &str);
    fn get(&self) -> Option<String>;
    fn remove(&self);
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredToken {
    token: String,
    stored_at: DateTime<Utc>,
}

/// File-backed session state under a single directory.
///
/// Holds the bearer token plus the non-authoritative display record written
/// at login. The display record is only ever used for rendering; all
/// authorization decisions go through the token.
pub struct FileStateStore {
    dir: PathBuf,
}

impl FileStateStore {
    pub fn new(dir: &Path) -> std::io::Result<Self> {
        fs::create_dir_all(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn token_path(&self) -> PathBuf {
        self.dir.join(TOKEN_FILE)
    }

    fn display_path(&self) -> PathBuf {
        self.dir.join(DISPLAY_FILE)
    }

    fn remove_file(path: &Path) {
        if let Err(e) = fs::remove_file(path) {
            if e.kind() != ErrorKind::NotFound {
                tracing::warn!("failed to remove {}: {}", path.display(), e);
            }
        }
    }

    /// Persist the display record written at login.
    pub fn set_display(&self, user: &DisplayUser) {
        match serde_json::to_vec_pretty(user) {
            Ok(bytes) => {
                if let Err(e) = fs::write(self.display_path(), bytes) {
                    tracing::warn!("failed to persist display record: {}", e);
                }
            }
            Err(e) => tracing::warn!("failed to encode display record: {}", e),
        }
    }

    pub fn display(&self) -> Option<DisplayUser> {
        let bytes = fs::read(self.display_path()).ok()?;
        serde_json::from_slice(&bytes).ok()
    }

    pub fn remove_display(&self) {
        Self::remove_file(&self.display_path());
    }
}

impl TokenStore for FileStateStore {
    fn set(&self, token: &str) {
        let record = StoredToken {
            token: token.to_string(),
            stored_at: Utc::now(),
        };
        match serde_json::to_vec(&record) {
            Ok(bytes) => {
                if let Err(e) = fs::write(self.token_path(), bytes) {
                    tracing::warn!("failed to persist token: {}", e);
                }
            }
            Err(e) => tracing::warn!("failed to encode token record: {}", e),
        }
    }

    fn get(&self) -> Option<String> {
        let bytes = fs::read(self.token_path()).ok()?;
        let record: StoredToken = serde_json::from_slice(&bytes).ok()?;
        // Past the retention window the cookie would have vanished; the
        // record reads back as absent without being rewritten.
        if Utc::now() - record.stored_at > Duration::days(TOKEN_RETENTION_DAYS) {
            return None;
        }
        Some(record.token)
    }

    fn remove(&self) {
        Self::remove_file(&self.token_path());
    }
}

/// In-memory token slot for tests and embedding.
#[derive(Default)]
pub struct MemoryTokenStore {
    slot: Mutex<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl TokenStore for MemoryTokenStore {
    fn set(&self, token: &str) {
        *self.slot.lock().unwrap() = Some(token.to_string());
    }

    fn get(&self) -> Option<String> {
        self.slot.lock().unwrap().clone()
    }

    fn remove(&self) {
        *self.slot.lock().unwrap() = None;
    }
}
