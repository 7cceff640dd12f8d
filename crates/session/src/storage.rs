//! Durable client-side key/value storage for session fields.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;

/// Fixed storage key names.
pub mod keys {
    pub const ACCESS_TOKEN: &str = "accessToken";
    pub const REFRESH_TOKEN: &str = "refreshToken";
    pub const USER_ROLE: &str = "userRole";
    pub const ONBOARDING_COMPLETE: &str = "onboardingComplete";
    pub const USER_SUBSCRIPTION_TIER: &str = "userSubscriptionTier";

    pub const ALL: [&str; 5] = [
        ACCESS_TOKEN,
        REFRESH_TOKEN,
        USER_ROLE,
        ONBOARDING_COMPLETE,
        USER_SUBSCRIPTION_TIER,
    ];
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// String key/value storage that survives restarts.
pub trait ClientStorage: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

impl<S: ClientStorage + ?Sized> ClientStorage for Arc<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get(key)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set(key, value)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove(key)
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Process-local storage. Useful for tests and ephemeral sessions.
#[derive(Debug, Default)]
pub struct InMemoryStorage {
    entries: Mutex<HashMap<String, String>>,
}

impl InMemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored keys.
    pub fn len(&self) -> usize {
        lock(&self.entries).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl ClientStorage for InMemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(lock(&self.entries).get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        lock(&self.entries).insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        lock(&self.entries).remove(key);
        Ok(())
    }
}

/// Storage backed by a single JSON object on disk.
///
/// Every write rewrites the file through a sibling temp file and a rename, so a
/// crash leaves either the old or the new contents. An unreadable document is
/// treated as empty and replaced by the next write.
#[derive(Debug)]
pub struct FileStorage {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_err(&self, source: std::io::Error) -> StorageError {
        StorageError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, StorageError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => return Ok(BTreeMap::new()),
            Err(err) => return Err(self.io_err(err)),
        };
        if raw.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&raw) {
            Ok(entries) => Ok(entries),
            Err(err) => {
                tracing::warn!(path = ?self.path, error = %err, "discarding unreadable session file");
                Ok(BTreeMap::new())
            }
        }
    }

    fn write_all(&self, entries: &BTreeMap<String, String>) -> Result<(), StorageError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| self.io_err(e))?;
        }
        let body = serde_json::to_string_pretty(entries).map_err(|e| self.io_err(e.into()))?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, body).map_err(|e| self.io_err(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.io_err(e))
    }

    fn update(
        &self,
        apply: impl FnOnce(&mut BTreeMap<String, String>) -> bool,
    ) -> Result<(), StorageError> {
        let _guard = lock(&self.write_lock);
        let mut entries = self.read_all()?;
        // A discarded unreadable file must still be rewritten.
        let stale = entries.is_empty() && self.path.exists();
        if apply(&mut entries) || stale {
            self.write_all(&entries)?;
        }
        Ok(())
    }
}

impl ClientStorage for FileStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.update(|entries| {
            entries.insert(key.to_string(), value.to_string()).as_deref() != Some(value)
        })
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.update(|entries| entries.remove(key).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_path() -> PathBuf {
        std::env::temp_dir()
            .join(format!("compliancehub-storage-{}", uuid::Uuid::now_v7()))
            .join("session.json")
    }

    #[test]
    fn in_memory_set_get_remove() {
        let storage = InMemoryStorage::new();
        assert_eq!(storage.get(keys::USER_ROLE).unwrap(), None);

        storage.set(keys::USER_ROLE, "accountant").unwrap();
        assert_eq!(
            storage.get(keys::USER_ROLE).unwrap().as_deref(),
            Some("accountant")
        );

        storage.remove(keys::USER_ROLE).unwrap();
        storage.remove(keys::USER_ROLE).unwrap();
        assert!(storage.is_empty());
    }

    #[test]
    fn file_storage_survives_reopening() {
        let path = temp_path();
        {
            let storage = FileStorage::new(&path);
            assert_eq!(storage.get(keys::ACCESS_TOKEN).unwrap(), None);
            storage.set(keys::ACCESS_TOKEN, "acc").unwrap();
            storage.set(keys::ONBOARDING_COMPLETE, "true").unwrap();
        }

        let reopened = FileStorage::new(&path);
        assert_eq!(reopened.get(keys::ACCESS_TOKEN).unwrap().as_deref(), Some("acc"));
        reopened.remove(keys::ACCESS_TOKEN).unwrap();
        assert_eq!(reopened.get(keys::ACCESS_TOKEN).unwrap(), None);
        assert_eq!(
            reopened.get(keys::ONBOARDING_COMPLETE).unwrap().as_deref(),
            Some("true")
        );

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }

    #[test]
    fn unreadable_file_reads_as_empty_and_is_replaced_on_write() {
        let path = temp_path();
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).unwrap();
        }
        std::fs::write(&path, r#"{"accessToken": 12"#).unwrap();

        let storage = FileStorage::new(&path);
        assert_eq!(storage.get(keys::ACCESS_TOKEN).unwrap(), None);

        storage.remove(keys::ACCESS_TOKEN).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap().trim(), "{}");

        std::fs::write(&path, "not json").unwrap();
        storage.set(keys::USER_ROLE, "staff").unwrap();
        assert_eq!(storage.get(keys::USER_ROLE).unwrap().as_deref(), Some("staff"));

        if let Some(dir) = path.parent() {
            let _ = std::fs::remove_dir_all(dir);
        }
    }
}
