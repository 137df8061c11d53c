// Passbox — Store error types

use thiserror::Error;
use uuid::Uuid;

/// Errors surfaced by the entry store.
///
/// Every operation is all-or-nothing against a single record, so there are
/// no partial-failure variants. Delete treats a missing record as success;
/// only update reports `NotFound`.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to open entry store: {0}")]
    Initialization(#[source] rusqlite::Error),

    #[error("failed to read from entry store: {0}")]
    Read(#[source] rusqlite::Error),

    #[error("failed to write to entry store: {0}")]
    Write(#[source] rusqlite::Error),

    #[error("entry not found: {0}")]
    NotFound(Uuid),
}
