// Passbox — Shared store handle
//
// `Store` is the handle the rest of the application talks to. It owns the
// database behind an async mutex: each operation holds the lock for its
// duration, so there is a single logical writer per operation and two
// concurrent updates to the same entry race with last-write-wins
// semantics. Cloning is cheap; all clones share the one database.

use std::path::Path;
use std::sync::Arc;

use tokio::sync::Mutex;
use uuid::Uuid;

use super::db::Database;
use super::models::{Entry, EntryPatch, NewEntry, StoreStats};
use super::repository::{EntryStore, SqliteEntryStore};
use super::StoreError;

#[derive(Clone)]
pub struct Store {
    db: Arc<Mutex<Database>>,
}

impl Store {
    /// Open (or create) the store at the given path. Idempotent: opening
    /// an existing database leaves its contents untouched.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            db: Arc::new(Mutex::new(Database::open(path)?)),
        })
    }

    /// Open a throwaway in-memory store.
    pub fn in_memory() -> Result<Self, StoreError> {
        Ok(Self {
            db: Arc::new(Mutex::new(Database::open_in_memory()?)),
        })
    }

    pub async fn add(&self, new: NewEntry) -> Result<Entry, StoreError> {
        let db = self.db.lock().await;
        SqliteEntryStore::new(&db).add(new)
    }

    pub async fn get(&self, id: &Uuid) -> Result<Option<Entry>, StoreError> {
        let db = self.db.lock().await;
        SqliteEntryStore::new(&db).get(id)
    }

    pub async fn list(&self) -> Result<Vec<Entry>, StoreError> {
        let db = self.db.lock().await;
        SqliteEntryStore::new(&db).list()
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Entry>, StoreError> {
        let db = self.db.lock().await;
        SqliteEntryStore::new(&db).search(query)
    }

    pub async fn update(&self, id: &Uuid, patch: EntryPatch) -> Result<Entry, StoreError> {
        let db = self.db.lock().await;
        SqliteEntryStore::new(&db).update(id, patch)
    }

    pub async fn delete(&self, id: &Uuid) -> Result<bool, StoreError> {
        let db = self.db.lock().await;
        SqliteEntryStore::new(&db).delete(id)
    }

    pub async fn stats(&self) -> Result<StoreStats, StoreError> {
        let db = self.db.lock().await;
        SqliteEntryStore::new(&db).stats()
    }

    pub async fn clear(&self) -> Result<(), StoreError> {
        let db = self.db.lock().await;
        SqliteEntryStore::new(&db).clear()
    }

    pub async fn restore(&self, entry: &Entry) -> Result<(), StoreError> {
        let db = self.db.lock().await;
        SqliteEntryStore::new(&db).restore(entry)
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
