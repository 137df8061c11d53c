// Passbox — Entry data models
//
// The secret value is stored and listed in the clear (this is a local,
// unencrypted store by design), but it is kept out of Debug output so it
// never leaks into logs or panic messages.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A stored credential entry.
///
/// The identifier is assigned at creation and never changes. `created_at`
/// and `updated_at` are equal right after creation; updates refresh only
/// `updated_at`, and it is strictly later after every update.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub id: Uuid,
    pub service: String,
    pub username: String,
    pub secret: String,
    pub url: Option<String>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Shallow-merge a patch over this entry. Unset patch fields keep their
    /// current values. `url` and `notes` can be replaced but not cleared
    /// through a patch.
    pub fn apply(&mut self, patch: EntryPatch) {
        if let Some(service) = patch.service {
            self.service = service;
        }
        if let Some(username) = patch.username {
            self.username = username;
        }
        if let Some(secret) = patch.secret {
            self.secret = secret;
        }
        if let Some(url) = patch.url {
            self.url = Some(url);
        }
        if let Some(notes) = patch.notes {
            self.notes = Some(notes);
        }
    }
}

/// Debug output never reveals the secret.
impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("id", &self.id)
            .field("service", &self.service)
            .field("username", &self.username)
            .field("secret", &"[REDACTED]")
            .field("url", &self.url)
            .field("notes", &self.notes)
            .field("created_at", &self.created_at)
            .field("updated_at", &self.updated_at)
            .finish()
    }
}

impl fmt::Display for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {} ({})", self.id, self.service, self.username)
    }
}

/// Input for creating a new entry. The store assigns the id and timestamps.
#[derive(Clone)]
pub struct NewEntry {
    pub service: String,
    pub username: String,
    pub secret: String,
    pub url: Option<String>,
    pub notes: Option<String>,
}

/// A partial update, merged shallowly over an existing entry.
///
/// The patch is a typed struct, so fields that don't exist on the record
/// are unrepresentable; there is nothing to validate at merge time.
#[derive(Clone, Default)]
pub struct EntryPatch {
    pub service: Option<String>,
    pub username: Option<String>,
    pub secret: Option<String>,
    pub url: Option<String>,
    pub notes: Option<String>,
}

impl EntryPatch {
    /// True if the patch carries no fields at all.
    pub fn is_empty(&self) -> bool {
        self.service.is_none()
            && self.username.is_none()
            && self.secret.is_none()
            && self.url.is_none()
            && self.notes.is_none()
    }
}

/// Aggregate numbers derived from a full listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StoreStats {
    pub total: usize,
    pub has_entries: bool,
}

// ─── Tests ───────────────────────────────────────────────────────────────────
