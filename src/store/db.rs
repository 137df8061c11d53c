// Passbox — SQLite database management
//
// Opens and initializes the entry database. Schema setup is idempotent:
// the table and its lookup indexes are created if absent, so opening an
// already-initialized database is a no-op.

use std::path::Path;

use rusqlite::Connection;

use super::StoreError;

/// Wrapper around the SQLite connection holding the entry table.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open (or create) the database at the given path.
    pub fn open(path: &Path) -> Result<Self, StoreError> {
        let conn = Connection::open(path).map_err(StoreError::Initialization)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Open an in-memory database. Used by tests and throwaway sessions;
    /// the contents vanish when the handle is dropped.
    pub fn open_in_memory() -> Result<Self, StoreError> {
        let conn = Connection::open_in_memory().map_err(StoreError::Initialization)?;
        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Get a reference to the underlying connection.
    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    /// Create the entry table and its secondary lookup indexes if absent.
    ///
    /// The indexes mirror the three lookup paths the application uses:
    /// by service, by username, and by last-modified timestamp. Search is
    /// still a full scan; they only speed up ordering and future lookups.
    fn init_schema(&self) -> Result<(), StoreError> {
        self.conn
            .execute_batch(
                "
                CREATE TABLE IF NOT EXISTS entries (
                    id          TEXT PRIMARY KEY,
                    service     TEXT NOT NULL,
                    username    TEXT NOT NULL,
                    secret      TEXT NOT NULL,
                    url         TEXT,
                    notes       TEXT,
                    created_at  TEXT NOT NULL,
                    updated_at  TEXT NOT NULL
                );

                CREATE INDEX IF NOT EXISTS idx_entries_service
                    ON entries(service);

                CREATE INDEX IF NOT EXISTS idx_entries_username
                    ON entries(username);

                CREATE INDEX IF NOT EXISTS idx_entries_updated_at
                    ON entries(updated_at);
                ",
            )
            .map_err(StoreError::Initialization)?;

        tracing::debug!("entry table and indexes ready");
        Ok(())
    }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
