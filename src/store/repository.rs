// Passbox — Entry store repository
//
// Implements CRUD plus substring search over the entry table. Timestamps
// are stored as RFC 3339 text with fixed-width fractional seconds, so the
// stored strings order the same way the instants do and `ORDER BY
// updated_at` needs no parsing.

use chrono::{DateTime, Duration, DurationRound, SecondsFormat, Utc};
use rusqlite::params;
use uuid::Uuid;

use super::db::Database;
use super::models::{Entry, EntryPatch, NewEntry, StoreStats};
use super::StoreError;

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over entry storage operations.
pub trait EntryStore {
    /// Add a new entry. The store assigns the id and both timestamps
    /// (equal at creation) and returns the stored record.
    fn add(&self, new: NewEntry) -> Result<Entry, StoreError>;

    /// Get an entry by id. Absence is not an error.
    fn get(&self, id: &Uuid) -> Result<Option<Entry>, StoreError>;

    /// List all entries, most recently updated first. An empty result is
    /// valid, not an error.
    fn list(&self) -> Result<Vec<Entry>, StoreError>;

    /// Search entries by case-insensitive substring on service or
    /// username. An empty or whitespace-only query behaves like `list`.
    fn search(&self, query: &str) -> Result<Vec<Entry>, StoreError>;

    /// Merge a patch over an existing entry, refresh its last-modified
    /// timestamp, and return the merged record. Fails with `NotFound` if
    /// the id does not exist.
    fn update(&self, id: &Uuid, patch: EntryPatch) -> Result<Entry, StoreError>;

    /// Delete an entry. Returns true if it existed; deleting a missing
    /// entry succeeds silently.
    fn delete(&self, id: &Uuid) -> Result<bool, StoreError>;

    /// Count and "has any entries" flag, derived from `list`.
    fn stats(&self) -> Result<StoreStats, StoreError>;

    /// Remove every entry. Used for reset and tests.
    fn clear(&self) -> Result<(), StoreError>;

    /// Insert a full entry as-is, keeping its id and timestamps. Used to
    /// restore a backup; fails with `Write` on an id collision.
    fn restore(&self, entry: &Entry) -> Result<(), StoreError>;
}

// ─── SQLite implementation ───────────────────────────────────────────────────

pub struct SqliteEntryStore<'a> {
    db: &'a Database,
}

/// Fixed-width RFC 3339 so the stored text orders chronologically.
fn timestamp(dt: &DateTime<Utc>) -> String {
    dt.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Current time truncated to the microsecond precision the table keeps,
/// so a returned record compares equal to its persisted row.
fn now_micros() -> DateTime<Utc> {
    let now = Utc::now();
    now.duration_trunc(Duration::microseconds(1)).unwrap_or(now)
}

impl<'a> SqliteEntryStore<'a> {
    pub fn new(db: &'a Database) -> Self {
        Self { db }
    }

    /// Parse an entry row from the database.
    fn row_to_entry(row: &rusqlite::Row<'_>) -> rusqlite::Result<Entry> {
        let id_str: String = row.get(0)?;
        let service: String = row.get(1)?;
        let username: String = row.get(2)?;
        let secret: String = row.get(3)?;
        let url: Option<String> = row.get(4)?;
        let notes: Option<String> = row.get(5)?;
        let created_at_str: String = row.get(6)?;
        let updated_at_str: String = row.get(7)?;

        let id = Uuid::parse_str(&id_str).map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
        })?;
        let created_at = parse_timestamp(&created_at_str, 6)?;
        let updated_at = parse_timestamp(&updated_at_str, 7)?;

        Ok(Entry {
            id,
            service,
            username,
            secret,
            url,
            notes,
            created_at,
            updated_at,
        })
    }

    fn insert(&self, entry: &Entry) -> Result<(), StoreError> {
        self.db
            .conn()
            .execute(
                "INSERT INTO entries
                    (id, service, username, secret, url, notes, created_at, updated_at)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    entry.id.to_string(),
                    entry.service,
                    entry.username,
                    entry.secret,
                    entry.url,
                    entry.notes,
                    timestamp(&entry.created_at),
                    timestamp(&entry.updated_at),
                ],
            )
            .map_err(StoreError::Write)?;
        Ok(())
    }
}

fn parse_timestamp(raw: &str, column: usize) -> rusqlite::Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                column,
                rusqlite::types::Type::Text,
                Box::new(e),
            )
        })
}

impl<'a> EntryStore for SqliteEntryStore<'a> {
    fn add(&self, new: NewEntry) -> Result<Entry, StoreError> {
        let now = now_micros();
        let entry = Entry {
            id: Uuid::new_v4(),
            service: new.service,
            username: new.username,
            secret: new.secret,
            url: new.url,
            notes: new.notes,
            created_at: now,
            updated_at: now,
        };

        self.insert(&entry)?;

        tracing::info!(entry_id = %entry.id, service = %entry.service, "entry stored");
        Ok(entry)
    }

    fn get(&self, id: &Uuid) -> Result<Option<Entry>, StoreError> {
        let mut stmt = self
            .db
            .conn()
            .prepare(
                "SELECT id, service, username, secret, url, notes, created_at, updated_at
                 FROM entries WHERE id = ?1",
            )
            .map_err(StoreError::Read)?;

        let mut rows = stmt
            .query_map(params![id.to_string()], Self::row_to_entry)
            .map_err(StoreError::Read)?;

        match rows.next() {
            Some(Ok(entry)) => Ok(Some(entry)),
            Some(Err(e)) => Err(StoreError::Read(e)),
            None => Ok(None),
        }
    }

    fn list(&self) -> Result<Vec<Entry>, StoreError> {
        let mut stmt = self
            .db
            .conn()
            .prepare(
                "SELECT id, service, username, secret, url, notes, created_at, updated_at
                 FROM entries ORDER BY updated_at DESC, created_at DESC, id",
            )
            .map_err(StoreError::Read)?;

        let rows = stmt
            .query_map([], Self::row_to_entry)
            .map_err(StoreError::Read)?;

        let mut entries = Vec::new();
        for row in rows {
            entries.push(row.map_err(StoreError::Read)?);
        }
        Ok(entries)
    }

    fn search(&self, query: &str) -> Result<Vec<Entry>, StoreError> {
        let needle = query.trim().to_lowercase();

        // Full scan; the list is already in descending updated_at order.
        let mut entries = self.list()?;
        if needle.is_empty() {
            return Ok(entries);
        }

        entries.retain(|e| {
            e.service.to_lowercase().contains(&needle)
                || e.username.to_lowercase().contains(&needle)
        });
        Ok(entries)
    }

    fn update(&self, id: &Uuid, patch: EntryPatch) -> Result<Entry, StoreError> {
        let mut entry = self.get(id)?.ok_or(StoreError::NotFound(*id))?;
        let prev_updated = entry.updated_at;
        entry.apply(patch);

        // The new stamp must be strictly later than the stored one, even
        // when two updates land within the same clock tick.
        let mut now = now_micros();
        if now <= prev_updated {
            now = prev_updated + Duration::microseconds(1);
        }
        entry.updated_at = now;

        let affected = self
            .db
            .conn()
            .execute(
                "UPDATE entries
                 SET service = ?1, username = ?2, secret = ?3, url = ?4, notes = ?5,
                     updated_at = ?6
                 WHERE id = ?7",
                params![
                    entry.service,
                    entry.username,
                    entry.secret,
                    entry.url,
                    entry.notes,
                    timestamp(&entry.updated_at),
                    entry.id.to_string(),
                ],
            )
            .map_err(StoreError::Write)?;

        if affected == 0 {
            return Err(StoreError::NotFound(*id));
        }

        tracing::info!(entry_id = %entry.id, "entry updated");
        Ok(entry)
    }

    fn delete(&self, id: &Uuid) -> Result<bool, StoreError> {
        let affected = self
            .db
            .conn()
            .execute("DELETE FROM entries WHERE id = ?1", params![id.to_string()])
            .map_err(StoreError::Write)?;

        if affected > 0 {
            tracing::info!(entry_id = %id, "entry deleted");
        }
        Ok(affected > 0)
    }

    fn stats(&self) -> Result<StoreStats, StoreError> {
        let entries = self.list()?;
        Ok(StoreStats {
            total: entries.len(),
            has_entries: !entries.is_empty(),
        })
    }

    fn clear(&self) -> Result<(), StoreError> {
        let removed = self
            .db
            .conn()
            .execute("DELETE FROM entries", [])
            .map_err(StoreError::Write)?;

        tracing::info!(removed, "entry table cleared");
        Ok(())
    }

    fn restore(&self, entry: &Entry) -> Result<(), StoreError> {
        self.insert(entry)?;
        tracing::info!(entry_id = %entry.id, "entry restored");
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> Database {
        Database::open_in_memory().unwrap()
    }

    fn sample(service: &str, username: &str) -> NewEntry {
        NewEntry {
            service: service.to_string(),
            username: username.to_string(),
            secret: format!("pw-{}", service),
            url: None,
            notes: None,
        }
    }

    #[test]
    fn test_add_assigns_id_and_equal_timestamps() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        let entry = store.add(sample("github", "octocat")).unwrap();
        assert_eq!(entry.id.get_version(), Some(uuid::Version::Random));
        assert_eq!(
            entry.created_at, entry.updated_at,
            "both timestamps must be equal at creation"
        );
    }

    #[test]
    fn test_add_then_list_includes_new_entry() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        let entry = store.add(sample("github", "octocat")).unwrap();
        let all = store.list().unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].id, entry.id);
        assert_eq!(all[0].secret, "pw-github");
        assert_eq!(all[0].created_at, all[0].updated_at);
    }

    #[test]
    fn test_get_nonexistent_returns_none() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        assert!(store.get(&Uuid::new_v4()).unwrap().is_none());
    }

    #[test]
    fn test_list_empty_store_is_ok() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);
        assert!(store.list().unwrap().is_empty());
    }

    #[test]
    fn test_update_merges_patch_and_bumps_updated_at() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        let entry = store.add(sample("github", "octocat")).unwrap();
        let updated = store
            .update(
                &entry.id,
                EntryPatch {
                    username: Some("hubber".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.id, entry.id, "id is immutable");
        assert_eq!(updated.username, "hubber");
        assert_eq!(updated.service, "github", "unpatched field is kept");
        assert_eq!(updated.created_at, entry.created_at, "created_at never changes");
        assert!(
            updated.updated_at > entry.updated_at,
            "updated_at must be strictly later"
        );

        // The persisted row reflects the merge, not just the returned value.
        let fetched = store.get(&entry.id).unwrap().unwrap();
        assert_eq!(fetched.username, "hubber");
        assert!(fetched.updated_at > entry.updated_at);
    }

    #[test]
    fn test_two_quick_updates_keep_timestamps_strictly_increasing() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        let entry = store.add(sample("github", "octocat")).unwrap();
        let first = store.update(&entry.id, EntryPatch::default()).unwrap();
        let second = store.update(&entry.id, EntryPatch::default()).unwrap();
        assert!(first.updated_at > entry.updated_at);
        assert!(second.updated_at > first.updated_at);
    }

    #[test]
    fn test_update_nonexistent_fails_with_not_found() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        let missing = Uuid::new_v4();
        let err = store.update(&missing, EntryPatch::default()).unwrap_err();
        match err {
            StoreError::NotFound(id) => assert_eq!(id, missing),
            other => panic!("expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_delete_is_idempotent() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        let entry = store.add(sample("github", "octocat")).unwrap();
        assert!(store.delete(&entry.id).unwrap());
        assert!(store.get(&entry.id).unwrap().is_none());

        // Deleting again is a silent success.
        assert!(!store.delete(&entry.id).unwrap());
    }

    #[test]
    fn test_search_empty_query_equals_list() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        store.add(sample("github", "octocat")).unwrap();
        store.add(sample("gitlab", "tanuki")).unwrap();
        store.add(sample("twitter", "bird")).unwrap();

        let listed: Vec<Uuid> = store.list().unwrap().iter().map(|e| e.id).collect();
        let searched: Vec<Uuid> = store.search("   ").unwrap().iter().map(|e| e.id).collect();
        assert_eq!(listed, searched, "blank query must match list, order included");
        assert_eq!(listed.len(), 3);
    }

    #[test]
    fn test_search_matches_service_case_insensitively() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        store.add(sample("GitHub", "octocat")).unwrap();
        let gitlab = store.add(sample("gitlab", "tanuki")).unwrap();
        store.add(sample("Twitter", "bird")).unwrap();

        // Touch gitlab so it is unambiguously the most recently updated.
        store.update(&gitlab.id, EntryPatch::default()).unwrap();

        let hits = store.search("git").unwrap();
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].service, "gitlab", "most recently updated first");
        assert_eq!(hits[1].service, "GitHub");
    }

    #[test]
    fn test_search_matches_username_too() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        store.add(sample("example.com", "alice")).unwrap();
        store.add(sample("other.org", "bob")).unwrap();

        let hits = store.search("ALI").unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].username, "alice");
    }

    #[test]
    fn test_search_no_match_returns_empty() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        store.add(sample("github", "octocat")).unwrap();
        assert!(store.search("nonexistent").unwrap().is_empty());
    }

    #[test]
    fn test_list_orders_by_last_modified_descending() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        let a = store.add(sample("aaa", "a")).unwrap();
        let _b = store.add(sample("bbb", "b")).unwrap();
        let _c = store.add(sample("ccc", "c")).unwrap();

        // Updating the oldest entry moves it to the front.
        store.update(&a.id, EntryPatch::default()).unwrap();

        let all = store.list().unwrap();
        assert_eq!(all.len(), 3);
        assert_eq!(all[0].id, a.id);
    }

    #[test]
    fn test_stats_tracks_adds_and_deletes() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        let first = store.add(sample("one", "u1")).unwrap();
        store.add(sample("two", "u2")).unwrap();
        store.add(sample("three", "u3")).unwrap();
        store.delete(&first.id).unwrap();

        let stats = store.stats().unwrap();
        assert_eq!(stats.total, 2);
        assert!(stats.has_entries);

        store.clear().unwrap();
        let stats = store.stats().unwrap();
        assert_eq!(stats.total, 0);
        assert!(!stats.has_entries);
    }

    #[test]
    fn test_clear_empties_the_table() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        store.add(sample("one", "u1")).unwrap();
        store.add(sample("two", "u2")).unwrap();
        store.clear().unwrap();
        assert!(store.list().unwrap().is_empty());

        // Clearing an already-empty table is fine.
        store.clear().unwrap();
    }

    #[test]
    fn test_restore_preserves_ids_and_timestamps() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        store.add(sample("github", "octocat")).unwrap();
        store.add(sample("gitlab", "tanuki")).unwrap();
        let backup = store.list().unwrap();

        store.clear().unwrap();
        for entry in &backup {
            store.restore(entry).unwrap();
        }

        let restored = store.list().unwrap();
        assert_eq!(restored, backup, "restore must reproduce records exactly");
    }

    #[test]
    fn test_restore_duplicate_id_is_a_write_error() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        let entry = store.add(sample("github", "octocat")).unwrap();
        let err = store.restore(&entry).unwrap_err();
        match err {
            StoreError::Write(_) => {}
            other => panic!("expected Write error on id collision, got {:?}", other),
        }
    }

    #[test]
    fn test_full_crud_lifecycle() {
        let db = setup();
        let store = SqliteEntryStore::new(&db);

        // Create
        let entry = store
            .add(NewEntry {
                service: "example.com".to_string(),
                username: "alice".to_string(),
                secret: "correct horse battery staple".to_string(),
                url: Some("https://example.com/login".to_string()),
                notes: Some("personal account".to_string()),
            })
            .unwrap();

        // Read
        let fetched = store.get(&entry.id).unwrap().unwrap();
        assert_eq!(fetched, entry);

        // Update
        let updated = store
            .update(
                &entry.id,
                EntryPatch {
                    secret: Some("rotated".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.secret, "rotated");

        // Delete
        assert!(store.delete(&entry.id).unwrap());
        assert!(store.get(&entry.id).unwrap().is_none());
        assert!(store.list().unwrap().is_empty());
    }
}
