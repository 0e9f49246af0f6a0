//! Persisted bearer-token storage
//!
//! The signed-in bearer token outlives the process in a small local file so
//! the next run can restore the session without re-authenticating. The file
//! carries its own expiry; a record past its expiry reads as absent, the same
//! way an expired cookie never reaches the application.

use crate::error::Result;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::warn;

/// Maximum token lifetime: one hour from issuance
pub const TOKEN_MAX_AGE_SECS: i64 = 3600;

/// Source of "now" for expiry checks; swapped out in tests
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// On-disk token record
#[derive(Debug, Serialize, Deserialize)]
struct TokenRecord {
    token: String,
    expires_at: DateTime<Utc>,
}

/// File-backed store for the session bearer token
#[derive(Clone)]
pub struct TokenStore {
    path: PathBuf,
    now: Clock,
}

impl TokenStore {
    /// Create a store persisting to `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            now: Arc::new(Utc::now),
        }
    }

    /// Create a store with an injected clock, for exercising expiry in tests
    pub fn with_clock(path: impl Into<PathBuf>, now: Clock) -> Self {
        Self {
            path: path.into(),
            now,
        }
    }

    /// Path of the underlying token file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Store a token, overwriting any prior value, expiring after `max_age_secs`
    pub fn save(&self, token: &str, max_age_secs: i64) -> Result<()> {
        let record = TokenRecord {
            token: token.to_string(),
            expires_at: (self.now)() + Duration::seconds(max_age_secs),
        };
        fs::write(&self.path, serde_json::to_string(&record)?)?;
        Ok(())
    }

    /// Return the stored token if present and unexpired.
    ///
    /// An expired record is removed, and an unreadable one reads as absent:
    /// storage lives on the local filesystem, so failures here mean the host
    /// environment itself is broken and there is nothing to recover.
    pub fn read(&self) -> Option<String> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
            Err(e) => {
                warn!("Failed to read token file {}: {}", self.path.display(), e);
                return None;
            }
        };

        let record: TokenRecord = match serde_json::from_str(&content) {
            Ok(record) => record,
            Err(e) => {
                warn!("Discarding malformed token file {}: {}", self.path.display(), e);
                self.clear();
                return None;
            }
        };

        if (self.now)() >= record.expires_at {
            self.clear();
            return None;
        }

        Some(record.token)
    }

    /// Remove the stored token; does nothing if none is stored
    pub fn clear(&self) {
        if let Err(e) = fs::remove_file(&self.path) {
            if e.kind() != std::io::ErrorKind::NotFound {
                warn!("Failed to remove token file {}: {}", self.path.display(), e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// A clock that starts at a fixed instant and can be advanced by tests
    fn fake_clock() -> (Clock, Arc<AtomicI64>) {
        let offset = Arc::new(AtomicI64::new(0));
        let offset_clone = offset.clone();
        let epoch = Utc::now();
        let clock: Clock = Arc::new(move || {
            epoch + Duration::seconds(offset_clone.load(Ordering::SeqCst))
        });
        (clock, offset)
    }

    fn store_in(dir: &tempfile::TempDir) -> (TokenStore, Arc<AtomicI64>) {
        let (clock, offset) = fake_clock();
        let store = TokenStore::with_clock(dir.path().join("finder-token"), clock);
        (store, offset)
    }

    #[test]
    fn test_read_before_expiry_returns_token() {
        let dir = tempfile::tempdir().unwrap();
        let (store, offset) = store_in(&dir);

        store.save("tok1", TOKEN_MAX_AGE_SECS).unwrap();
        offset.store(TOKEN_MAX_AGE_SECS - 1, Ordering::SeqCst);
        assert_eq!(store.read(), Some("tok1".to_string()));
    }

    #[test]
    fn test_read_at_expiry_returns_absent() {
        let dir = tempfile::tempdir().unwrap();
        let (store, offset) = store_in(&dir);

        store.save("tok1", TOKEN_MAX_AGE_SECS).unwrap();
        offset.store(TOKEN_MAX_AGE_SECS, Ordering::SeqCst);
        assert_eq!(store.read(), None);
        // The expired record is gone, like an expired cookie
        assert!(!store.path().exists());
    }

    #[test]
    fn test_read_after_expiry_returns_absent() {
        let dir = tempfile::tempdir().unwrap();
        let (store, offset) = store_in(&dir);

        store.save("tok1", TOKEN_MAX_AGE_SECS).unwrap();
        offset.store(TOKEN_MAX_AGE_SECS + 600, Ordering::SeqCst);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_read_with_no_stored_token() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _offset) = store_in(&dir);
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_save_overwrites_prior_value() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _offset) = store_in(&dir);

        store.save("tok1", TOKEN_MAX_AGE_SECS).unwrap();
        store.save("tok2", TOKEN_MAX_AGE_SECS).unwrap();
        assert_eq!(store.read(), Some("tok2".to_string()));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _offset) = store_in(&dir);

        store.save("tok1", TOKEN_MAX_AGE_SECS).unwrap();
        store.clear();
        assert_eq!(store.read(), None);
        store.clear();
        assert_eq!(store.read(), None);
    }

    #[test]
    fn test_malformed_record_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let (store, _offset) = store_in(&dir);

        fs::write(store.path(), "not json").unwrap();
        assert_eq!(store.read(), None);
    }
}
