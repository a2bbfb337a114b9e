use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventStatus {
    Active,
    Cancelled,
}

/// Stored event record. Organizer name and email are snapshots taken at
/// creation time; later profile edits do not flow back into past events.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Event {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub date: NaiveDate,
    pub time: String,
    pub location: String,
    /// None means unlimited.
    pub capacity: Option<u32>,
    pub category: String,
    pub is_public: bool,
    pub organizer_id: Uuid,
    pub organizer_name: String,
    pub organizer_email: String,
    pub status: EventStatus,
    pub created_at: DateTime<Utc>,
}

impl Event {
    /// Open for registration: publicly listed and still active.
    pub fn is_open(&self) -> bool {
        self.is_public && self.status == EventStatus::Active
    }
}

/// Event plus its registration count. The count is recomputed from the
/// registrations collection on every read, never stored on the event.
#[derive(Debug, Clone, Serialize)]
pub struct EventSummary {
    #[serde(flatten)]
    pub event: Event,
    pub registered_attendees: usize,
}
