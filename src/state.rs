use std::sync::Arc;

use tokio::sync::Mutex;

use crate::auth::TokenKeys;
use crate::catalog::EventCatalog;
use crate::ledger::RegistrationLedger;
use crate::store::RecordStore;

/// Shared application state, built once at startup.
///
/// `write_gate` is the single-writer serialization point: every operation
/// that mutates a collection holds it across the whole load/modify/save
/// sequence. One process-wide lock (rather than one per collection) because
/// registration reads the events collection while writing registrations.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn RecordStore>,
    pub keys: Arc<TokenKeys>,
    pub write_gate: Arc<Mutex<()>>,
    pub catalog: EventCatalog,
    pub ledger: RegistrationLedger,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, keys: TokenKeys) -> Self {
        let write_gate = Arc::new(Mutex::new(()));
        Self {
            catalog: EventCatalog::new(store.clone(), write_gate.clone()),
            ledger: RegistrationLedger::new(store.clone(), write_gate.clone()),
            store,
            keys: Arc::new(keys),
            write_gate,
        }
    }
}
