use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::event::Event;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RegistrationStatus {
    Confirmed,
}

/// Stored registration record. Attendee name and email are snapshots taken
/// at registration time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Registration {
    pub id: Uuid,
    pub event_id: Uuid,
    pub attendee_id: Uuid,
    pub attendee_name: String,
    pub attendee_email: String,
    pub registered_at: DateTime<Utc>,
    pub status: RegistrationStatus,
}

/// Joined view returned for an attendee's own registrations.
#[derive(Debug, Clone, Serialize)]
pub struct RegisteredEvent {
    #[serde(flatten)]
    pub event: Event,
    pub registration_id: Uuid,
    pub registered_at: DateTime<Utc>,
    pub registration_status: RegistrationStatus,
}

/// View returned to an organizer listing an event's registrations.
#[derive(Debug, Clone, Serialize)]
pub struct EventRegistrations {
    pub event: EventHeader,
    pub registrations: Vec<Registration>,
    pub total_registrations: usize,
}

/// Minimal event fields echoed alongside its registration list.
#[derive(Debug, Clone, Serialize)]
pub struct EventHeader {
    pub id: Uuid,
    pub title: String,
    pub date: chrono::NaiveDate,
    pub capacity: Option<u32>,
}

impl From<&Event> for EventHeader {
    fn from(event: &Event) -> Self {
        Self {
            id: event.id,
            title: event.title.clone(),
            date: event.date,
            capacity: event.capacity,
        }
    }
}
