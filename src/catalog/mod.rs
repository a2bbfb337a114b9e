//! Event catalog: creation and discovery of events.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::auth::Identity;
use crate::models::{Event, EventStatus, EventSummary, Registration};
use crate::store::RecordStore;
use crate::utils::AppError;

#[derive(Debug, Deserialize)]
pub struct CreateEvent {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub location: String,
    pub capacity: Option<u32>,
    pub category: Option<String>,
    pub is_public: Option<bool>,
}

#[derive(Clone)]
pub struct EventCatalog {
    store: Arc<dyn RecordStore>,
    write_gate: Arc<Mutex<()>>,
}

impl EventCatalog {
    pub fn new(store: Arc<dyn RecordStore>, write_gate: Arc<Mutex<()>>) -> Self {
        Self { store, write_gate }
    }

    /// Creates an event owned by the caller. Organizer name and email are
    /// snapshotted from the stored user record at this instant.
    pub async fn create(&self, caller: &Identity, input: CreateEvent) -> Result<Event, AppError> {
        let date = validate(&input)?;

        let organizer = self.find_user(caller.id).await?;

        let event = Event {
            id: Uuid::new_v4(),
            title: input.title,
            description: input.description,
            date,
            time: input.time,
            location: input.location,
            capacity: input.capacity,
            category: input
                .category
                .filter(|c| !c.trim().is_empty())
                .unwrap_or_else(|| "General".to_string()),
            is_public: input.is_public.unwrap_or(true),
            organizer_id: organizer.id,
            organizer_name: organizer.name,
            organizer_email: organizer.email,
            status: EventStatus::Active,
            created_at: Utc::now(),
        };

        let _guard = self.write_gate.lock().await;
        let mut events = self.store.load_events().await?;
        events.push(event.clone());
        self.store.save_events(&events).await?;

        tracing::info!(event_id = %event.id, organizer_id = %event.organizer_id, "event created");
        Ok(event)
    }

    /// Events owned by the caller, each with its computed registration count.
    pub async fn list_owned(&self, caller: &Identity) -> Result<Vec<EventSummary>, AppError> {
        let events = self.store.load_events().await?;
        let counts = self.registration_counts().await?;

        Ok(events
            .into_iter()
            .filter(|event| event.organizer_id == caller.id)
            .map(|event| summarize(event, &counts))
            .collect())
    }

    /// Public active events in storage order, with computed counts.
    pub async fn list_public(&self) -> Result<Vec<EventSummary>, AppError> {
        let events = self.store.load_events().await?;
        let counts = self.registration_counts().await?;

        Ok(events
            .into_iter()
            .filter(Event::is_open)
            .map(|event| summarize(event, &counts))
            .collect())
    }

    async fn registration_counts(&self) -> Result<HashMap<Uuid, usize>, AppError> {
        let registrations = self.store.load_registrations().await?;
        Ok(count_by_event(&registrations))
    }

    async fn find_user(&self, id: Uuid) -> Result<crate::models::User, AppError> {
        self.store
            .load_users()
            .await?
            .into_iter()
            .find(|user| user.id == id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}

pub(crate) fn count_by_event(registrations: &[Registration]) -> HashMap<Uuid, usize> {
    let mut counts = HashMap::new();
    for registration in registrations {
        *counts.entry(registration.event_id).or_insert(0) += 1;
    }
    counts
}

fn summarize(event: Event, counts: &HashMap<Uuid, usize>) -> EventSummary {
    let registered_attendees = counts.get(&event.id).copied().unwrap_or(0);
    EventSummary {
        event,
        registered_attendees,
    }
}

fn validate(input: &CreateEvent) -> Result<NaiveDate, AppError> {
    let required = [
        &input.title,
        &input.description,
        &input.date,
        &input.time,
        &input.location,
    ];
    if required.iter().any(|value| value.trim().is_empty()) {
        return Err(AppError::Validation(
            "Please fill in all required fields".to_string(),
        ));
    }

    if let Some(capacity) = input.capacity {
        if capacity == 0 {
            return Err(AppError::Validation(
                "Capacity must be a positive number".to_string(),
            ));
        }
    }

    NaiveDate::parse_from_str(&input.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Date must be in YYYY-MM-DD format".to_string()))
}

#[cfg(test)]
mod tests {
    use crate::models::user::{Profile, Role, User};
    use crate::models::RegistrationStatus;
    use crate::store::MemoryStore;

    use super::*;

    fn catalog_with(store: Arc<MemoryStore>) -> EventCatalog {
        EventCatalog::new(store, Arc::new(Mutex::new(())))
    }

    async fn seed_organizer(store: &MemoryStore, name: &str, email: &str) -> Identity {
        let user = User {
            id: Uuid::new_v4(),
            name: name.to_string(),
            email: email.to_string(),
            password_hash: String::new(),
            role: Role::Organizer,
            profile: Profile::empty_for(Role::Organizer),
            created_at: Utc::now(),
        };
        let mut users = store.load_users().await.unwrap();
        users.push(user.clone());
        store.save_users(&users).await.unwrap();
        Identity {
            id: user.id,
            email: user.email,
            role: user.role,
        }
    }

    fn event_input(title: &str) -> CreateEvent {
        CreateEvent {
            title: title.to_string(),
            description: "A gathering".to_string(),
            date: "2026-10-01".to_string(),
            time: "18:00".to_string(),
            location: "Town hall".to_string(),
            capacity: None,
            category: None,
            is_public: None,
        }
    }

    #[tokio::test]
    async fn create_rejects_missing_required_fields() {
        let store = Arc::new(MemoryStore::new());
        let caller = seed_organizer(&store, "Olu", "olu@example.com").await;
        let catalog = catalog_with(store);

        let mut input = event_input("Meetup");
        input.location = "  ".to_string();

        assert!(matches!(
            catalog.create(&caller, input).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn create_rejects_unparseable_date_and_zero_capacity() {
        let store = Arc::new(MemoryStore::new());
        let caller = seed_organizer(&store, "Olu", "olu@example.com").await;
        let catalog = catalog_with(store);

        let mut input = event_input("Meetup");
        input.date = "next tuesday".to_string();
        assert!(matches!(
            catalog.create(&caller, input).await,
            Err(AppError::Validation(_))
        ));

        let mut input = event_input("Meetup");
        input.capacity = Some(0);
        assert!(matches!(
            catalog.create(&caller, input).await,
            Err(AppError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn create_snapshots_organizer_and_applies_defaults() {
        let store = Arc::new(MemoryStore::new());
        let caller = seed_organizer(&store, "Olu", "olu@example.com").await;
        let catalog = catalog_with(store.clone());

        let event = catalog.create(&caller, event_input("Meetup")).await.unwrap();

        assert_eq!(event.organizer_name, "Olu");
        assert_eq!(event.organizer_email, "olu@example.com");
        assert_eq!(event.category, "General");
        assert!(event.is_public);
        assert_eq!(event.status, EventStatus::Active);
        assert_eq!(store.load_events().await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn list_owned_filters_by_organizer() {
        let store = Arc::new(MemoryStore::new());
        let olu = seed_organizer(&store, "Olu", "olu@example.com").await;
        let ngozi = seed_organizer(&store, "Ngozi", "ngozi@example.com").await;
        let catalog = catalog_with(store);

        catalog.create(&olu, event_input("Olu's event")).await.unwrap();
        catalog
            .create(&ngozi, event_input("Ngozi's event"))
            .await
            .unwrap();

        let owned = catalog.list_owned(&olu).await.unwrap();
        assert_eq!(owned.len(), 1);
        assert_eq!(owned[0].event.title, "Olu's event");
    }

    #[tokio::test]
    async fn list_public_excludes_private_and_cancelled() {
        let store = Arc::new(MemoryStore::new());
        let caller = seed_organizer(&store, "Olu", "olu@example.com").await;
        let catalog = catalog_with(store.clone());

        catalog.create(&caller, event_input("Open")).await.unwrap();

        let mut private = event_input("Private");
        private.is_public = Some(false);
        catalog.create(&caller, private).await.unwrap();

        catalog.create(&caller, event_input("Dropped")).await.unwrap();
        let mut events = store.load_events().await.unwrap();
        events
            .iter_mut()
            .find(|e| e.title == "Dropped")
            .unwrap()
            .status = EventStatus::Cancelled;
        store.save_events(&events).await.unwrap();

        let public = catalog.list_public().await.unwrap();
        assert_eq!(public.len(), 1);
        assert_eq!(public[0].event.title, "Open");
    }

    #[tokio::test]
    async fn counts_come_from_the_registrations_collection() {
        let store = Arc::new(MemoryStore::new());
        let caller = seed_organizer(&store, "Olu", "olu@example.com").await;
        let catalog = catalog_with(store.clone());

        let event = catalog.create(&caller, event_input("Meetup")).await.unwrap();

        let registrations = vec![
            sample_registration(event.id),
            sample_registration(event.id),
        ];
        store.save_registrations(&registrations).await.unwrap();

        let owned = catalog.list_owned(&caller).await.unwrap();
        assert_eq!(owned[0].registered_attendees, 2);
    }

    fn sample_registration(event_id: Uuid) -> crate::models::Registration {
        crate::models::Registration {
            id: Uuid::new_v4(),
            event_id,
            attendee_id: Uuid::new_v4(),
            attendee_name: "Ada".to_string(),
            attendee_email: "ada@example.com".to_string(),
            registered_at: Utc::now(),
            status: RegistrationStatus::Confirmed,
        }
    }
}
