use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::{Event, Registration, User};

use super::{RecordStore, StoreError};

/// In-memory store with the same whole-collection semantics as the file
/// store. Used as a substitute in unit tests; never persisted.
#[derive(Default)]
pub struct MemoryStore {
    users: RwLock<Vec<User>>,
    events: RwLock<Vec<Event>>,
    registrations: RwLock<Vec<Registration>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn load_users(&self) -> Result<Vec<User>, StoreError> {
        Ok(self.users.read().await.clone())
    }

    async fn save_users(&self, records: &[User]) -> Result<(), StoreError> {
        *self.users.write().await = records.to_vec();
        Ok(())
    }

    async fn load_events(&self) -> Result<Vec<Event>, StoreError> {
        Ok(self.events.read().await.clone())
    }

    async fn save_events(&self, records: &[Event]) -> Result<(), StoreError> {
        *self.events.write().await = records.to_vec();
        Ok(())
    }

    async fn load_registrations(&self) -> Result<Vec<Registration>, StoreError> {
        Ok(self.registrations.read().await.clone())
    }

    async fn save_registrations(&self, records: &[Registration]) -> Result<(), StoreError> {
        *self.registrations.write().await = records.to_vec();
        Ok(())
    }
}
