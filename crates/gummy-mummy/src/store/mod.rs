//! Persistence collaborators: a client registry and an append-only archive
//! of section submissions and their results.

mod sqlite;

pub use sqlite::SqliteStore;

use chrono::{DateTime, Utc};

use crate::profile::{ClientId, ClientProfile, NewClient};

/// One archived submission/result pair. Never mutated after the append.
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveEntry {
    pub client_id: ClientId,
    pub section: String,
    pub payload: serde_json::Value,
    pub result: serde_json::Value,
    pub recorded_at: DateTime<Utc>,
}

/// Storage abstraction so the service can be exercised without SQLite.
pub trait ClientRepository: Send + Sync {
    /// Persist a registration and return the stored profile with its
    /// assigned identifier.
    fn insert(&self, client: &NewClient) -> Result<ClientProfile, StoreError>;

    fn fetch(&self, id: ClientId) -> Result<Option<ClientProfile>, StoreError>;
}

/// Append-only audit trail of submissions; reads exist only for auditing.
pub trait SubmissionArchive: Send + Sync {
    fn append(&self, entry: ArchiveEntry) -> Result<(), StoreError>;

    fn history(&self, client_id: ClientId) -> Result<Vec<ArchiveEntry>, StoreError>;
}

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("sqlite failure: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("stored row is malformed: {0}")]
    Corrupt(String),
}
