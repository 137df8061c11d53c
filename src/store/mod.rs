// Passbox — Store module
//
// Entry persistence over an embedded SQLite database: CRUD, substring
// search, and stats against a single table, most-recently-updated first.

mod db;
mod error;
mod handle;
mod models;
mod repository;

pub use db::Database;
pub use error::StoreError;
pub use handle::Store;
pub use models::{Entry, EntryPatch, NewEntry, StoreStats};
pub use repository::{EntryStore, SqliteEntryStore};
