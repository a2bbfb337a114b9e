use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{Event, Registration, User};

use super::{RecordStore, StoreError};

const USERS: &str = "users";
const EVENTS: &str = "events";
const REGISTRATIONS: &str = "registrations";

/// File-backed store: one pretty-printed JSON array per collection under a
/// single data directory. Saves go through a temp file and a rename so a
/// reader never observes a half-written collection.
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, collection: &str) -> PathBuf {
        self.dir.join(format!("{collection}.json"))
    }

    async fn load<T: DeserializeOwned>(
        &self,
        collection: &'static str,
    ) -> Result<Vec<T>, StoreError> {
        let path = self.path_for(collection);
        let bytes = match tokio::fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                tracing::debug!(collection, "collection file absent, reading as empty");
                return Ok(Vec::new());
            }
            Err(source) => return Err(StoreError::Read { collection, source }),
        };

        serde_json::from_slice(&bytes).map_err(|source| {
            tracing::error!(collection, path = %path.display(), error = %source, "collection file is corrupt");
            StoreError::Corrupt { collection, source }
        })
    }

    async fn save<T: Serialize>(
        &self,
        collection: &'static str,
        records: &[T],
    ) -> Result<(), StoreError> {
        let path = self.path_for(collection);
        let body = serde_json::to_vec_pretty(records).map_err(|source| StoreError::Corrupt {
            collection,
            source,
        })?;

        write_atomic(&self.dir, &path, &body)
            .await
            .map_err(|source| StoreError::Write { collection, source })
    }
}

async fn write_atomic(dir: &Path, path: &Path, body: &[u8]) -> std::io::Result<()> {
    tokio::fs::create_dir_all(dir).await?;
    let tmp = path.with_extension("json.tmp");
    tokio::fs::write(&tmp, body).await?;
    tokio::fs::rename(&tmp, path).await
}

#[async_trait]
impl RecordStore for JsonFileStore {
    async fn load_users(&self) -> Result<Vec<User>, StoreError> {
        self.load(USERS).await
    }

    async fn save_users(&self, records: &[User]) -> Result<(), StoreError> {
        self.save(USERS, records).await
    }

    async fn load_events(&self) -> Result<Vec<Event>, StoreError> {
        self.load(EVENTS).await
    }

    async fn save_events(&self, records: &[Event]) -> Result<(), StoreError> {
        self.save(EVENTS, records).await
    }

    async fn load_registrations(&self) -> Result<Vec<Registration>, StoreError> {
        self.load(REGISTRATIONS).await
    }

    async fn save_registrations(&self, records: &[Registration]) -> Result<(), StoreError> {
        self.save(REGISTRATIONS, records).await
    }
}
