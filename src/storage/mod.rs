//! Local persistence for the logged-in user
//!
//! The only thing kept on the device is a JSON blob under the `user` key.
//! [`SessionStore`] abstracts where that blob lives.

mod types;

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use log::warn;
use tokio::sync::Mutex;

use crate::error::{Error, Result};

pub use types::*;

/// Persistent storage for the logged-in user
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Read the stored user, if any
    async fn load(&self) -> Result<Option<StoredUser>>;

    /// Replace the stored user
    async fn save(&self, user: &StoredUser) -> Result<()>;

    /// Forget the stored user
    async fn clear(&self) -> Result<()>;
}

/// Keeps the user in memory for the lifetime of the process
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    user: Mutex<Option<StoredUser>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn load(&self) -> Result<Option<StoredUser>> {
        Ok(self.user.lock().await.clone())
    }

    async fn save(&self, user: &StoredUser) -> Result<()> {
        *self.user.lock().await = Some(user.clone());
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        *self.user.lock().await = None;
        Ok(())
    }
}

/// Key/value JSON file, each value a JSON-encoded string
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    lock: Mutex<()>,
}

type Entries = BTreeMap<String, String>;

impl FileSessionStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Location of the backing file
    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_entries(&self) -> Result<Entries> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Entries::new()),
            Err(e) => return Err(e.into()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(Entries::new());
        }

        serde_json::from_slice(&bytes).map_err(|e| {
            Error::storage(format!("{} is not a valid store: {}", self.path.display(), e))
        })
    }

    async fn write_entries(&self, entries: &Entries) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_vec_pretty(entries)?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self) -> Result<Option<StoredUser>> {
        let _guard = self.lock.lock().await;

        let entries = match self.read_entries().await {
            Ok(entries) => entries,
            Err(Error::Storage(msg)) => {
                warn!("ignoring unreadable session store: {}", msg);
                return Ok(None);
            }
            Err(e) => return Err(e),
        };

        let Some(blob) = entries.get(USER_KEY) else {
            return Ok(None);
        };

        match serde_json::from_str::<StoredUser>(blob) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!("ignoring stored user without a valid user_id: {}", e);
                Ok(None)
            }
        }
    }

    async fn save(&self, user: &StoredUser) -> Result<()> {
        let _guard = self.lock.lock().await;

        // a corrupt store is replaced; I/O failures are not
        let mut entries = match self.read_entries().await {
            Ok(entries) => entries,
            Err(Error::Storage(_)) => Entries::new(),
            Err(e) => return Err(e),
        };
        entries.insert(USER_KEY.to_string(), serde_json::to_string(user)?);
        self.write_entries(&entries).await
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.lock.lock().await;

        let mut entries = match self.read_entries().await {
            Ok(entries) => entries,
            Err(Error::Storage(_)) => Entries::new(),
            Err(e) => return Err(e),
        };
        if entries.remove(USER_KEY).is_none() && entries.is_empty() {
            return Ok(());
        }
        self.write_entries(&entries).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn memory_store_round_trip() {
        let store = MemorySessionStore::new();
        assert_eq!(store.load().await.unwrap(), None);

        store.save(&StoredUser::new(7)).await.unwrap();
        assert_eq!(store.load().await.unwrap().map(|u| u.user_id), Some(7));

        store.clear().await.unwrap();
        assert_eq!(store.load().await.unwrap(), None);
    }

    #[tokio::test]
    async fn save_replaces_a_corrupt_store() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();

        let store = FileSessionStore::new(&path);
        store.save(&StoredUser::new(3)).await.unwrap();
        assert_eq!(store.load().await.unwrap().map(|u| u.user_id), Some(3));
    }

    #[tokio::test]
    async fn save_propagates_read_failures() {
        let dir = tempfile::tempdir().unwrap();
        // a directory where the file should be cannot be read as a store
        let store = FileSessionStore::new(dir.path());

        let err = store.save(&StoredUser::new(3)).await.unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
