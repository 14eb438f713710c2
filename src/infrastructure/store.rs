//! # JSON Store
//!
//! File-backed implementation of `Store`. Users and threads are kept in one
//! JSON document (`data/database.json`) rewritten on every insert.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;
use tokio::sync::Mutex;

use crate::domain::error::StoreError;
use crate::domain::traits::Store;
use crate::domain::types::{ThreadRecord, UserRecord};

#[derive(Debug, Default, Serialize, Deserialize)]
struct Database {
    #[serde(default)]
    users: HashMap<String, UserRecord>,
    #[serde(default)]
    threads: HashMap<String, ThreadRecord>,
}

pub struct JsonStore {
    path: PathBuf,
    db: Mutex<Database>,
}

impl JsonStore {
    /// Opens the store at `path`, starting empty if the file does not exist.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let db = match tokio::fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Database::default(),
            Err(e) => return Err(e.into()),
        };
        tracing::info!(
            "Opened store {} ({} users, {} threads)",
            path.display(),
            db.users.len(),
            db.threads.len()
        );
        Ok(Self {
            path,
            db: Mutex::new(db),
        })
    }

    /// Writes the whole document. Callers roll back their in-memory change
    /// when this fails so memory never holds records the file lacks.
    async fn persist(&self, db: &Database) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent).await?;
        }
        let content = serde_json::to_string_pretty(db)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content).await?;
        if let Err(e) = tokio::fs::rename(&tmp, &self.path).await {
            let _ = tokio::fs::remove_file(&tmp).await;
            return Err(e.into());
        }
        Ok(())
    }
}

#[async_trait]
impl Store for JsonStore {
    async fn get_user(&self, id: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.db.lock().await.users.get(id).cloned())
    }

    async fn add_user(&self, record: UserRecord) -> Result<bool, StoreError> {
        let mut db = self.db.lock().await;
        if db.users.contains_key(&record.id) {
            return Ok(false);
        }
        let id = record.id.clone();
        db.users.insert(id.clone(), record);
        if let Err(e) = self.persist(&db).await {
            db.users.remove(&id);
            return Err(e);
        }
        Ok(true)
    }

    async fn get_thread(&self, id: &str) -> Result<Option<ThreadRecord>, StoreError> {
        Ok(self.db.lock().await.threads.get(id).cloned())
    }

    async fn add_thread(&self, record: ThreadRecord) -> Result<bool, StoreError> {
        let mut db = self.db.lock().await;
        if db.threads.contains_key(&record.id) {
            return Ok(false);
        }
        let id = record.id.clone();
        db.threads.insert(id.clone(), record);
        if let Err(e) = self.persist(&db).await {
            db.threads.remove(&id);
            return Err(e);
        }
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{ThreadProfile, UserProfile};
    use tempfile::tempdir;

    fn user(id: &str, name: &str) -> UserRecord {
        UserRecord::from_profile(
            id,
            UserProfile {
                display_name: Some(name.to_string()),
            },
        )
    }

    #[tokio::test]
    async fn test_missing_file_starts_empty() {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("database.json")).await.unwrap();
        assert!(store.get_user("@a:x").await.unwrap().is_none());
        assert!(store.get_thread("!r:x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_insert_is_idempotent() {
        let dir = tempdir().unwrap();
        let store = JsonStore::open(dir.path().join("database.json")).await.unwrap();

        assert!(store.add_user(user("@a:x", "first")).await.unwrap());
        assert!(!store.add_user(user("@a:x", "second")).await.unwrap());

        let stored = store.get_user("@a:x").await.unwrap().unwrap();
        assert_eq!(stored.name.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn test_records_survive_reopen() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("database.json");
        {
            let store = JsonStore::open(&path).await.unwrap();
            store.add_user(user("@a:x", "alice")).await.unwrap();
            store
                .add_thread(ThreadRecord::from_profile(
                    "!r:x",
                    ThreadProfile {
                        name: Some("lobby".into()),
                        member_count: 3,
                    },
                ))
                .await
                .unwrap();
        }

        let reopened = JsonStore::open(&path).await.unwrap();
        assert_eq!(
            reopened.get_user("@a:x").await.unwrap().unwrap().name.as_deref(),
            Some("alice")
        );
        assert_eq!(reopened.get_thread("!r:x").await.unwrap().unwrap().member_count, 3);
    }

    #[tokio::test]
    async fn test_failed_write_leaves_no_record() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("database.json");
        let store = JsonStore::open(&path).await.unwrap();

        // A directory in place of the file makes the final rename fail.
        std::fs::create_dir(&path).unwrap();
        assert!(matches!(
            store.add_user(user("@a:x", "alice")).await,
            Err(StoreError::Io(_))
        ));
        assert!(store.get_user("@a:x").await.unwrap().is_none());
        assert!(
            store
                .add_thread(ThreadRecord::from_profile("!r:x", ThreadProfile::default()))
                .await
                .is_err()
        );
        assert!(store.get_thread("!r:x").await.unwrap().is_none());

        std::fs::remove_dir(&path).unwrap();
        assert!(store.add_user(user("@a:x", "alice")).await.unwrap());

        let reopened = JsonStore::open(&path).await.unwrap();
        assert!(reopened.get_user("@a:x").await.unwrap().is_some());
        assert!(reopened.get_thread("!r:x").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("database.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(matches!(JsonStore::open(&path).await, Err(StoreError::Corrupt(_))));
    }
}
