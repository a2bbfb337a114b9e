//! Persistent store for the three record collections.
//!
//! Every collection is read and written as a whole unit; there are no
//! partial-record updates at this layer. Callers that mutate must hold the
//! process-wide write gate (see [`crate::state::AppState`]) across their
//! load/modify/save sequence, otherwise two writers can race and one set of
//! changes is lost.

use async_trait::async_trait;
use thiserror::Error;

use crate::models::{Event, Registration, User};

mod json;
mod memory;

pub use json::JsonFileStore;
pub use memory::MemoryStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read {collection} collection")]
    Read {
        collection: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {collection} collection")]
    Write {
        collection: &'static str,
        #[source]
        source: std::io::Error,
    },

    #[error("corrupt data in {collection} collection")]
    Corrupt {
        collection: &'static str,
        #[source]
        source: serde_json::Error,
    },
}

/// Whole-collection load/save over users, events and registrations.
///
/// `load_*` returns an empty sequence when the collection has never been
/// written; an unreadable or corrupt collection is an error, distinct from
/// legitimately empty. `save_*` either persists the full collection or
/// fails with the operation treated as not committed.
#[async_trait]
pub trait RecordStore: Send + Sync {
    async fn load_users(&self) -> Result<Vec<User>, StoreError>;
    async fn save_users(&self, records: &[User]) -> Result<(), StoreError>;

    async fn load_events(&self) -> Result<Vec<Event>, StoreError>;
    async fn save_events(&self, records: &[Event]) -> Result<(), StoreError>;

    async fn load_registrations(&self) -> Result<Vec<Registration>, StoreError>;
    async fn save_registrations(&self, records: &[Registration]) -> Result<(), StoreError>;
}
