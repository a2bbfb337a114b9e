//! Registration ledger: the only component that mutates the registrations
//! collection. Capacity and uniqueness checks run with the write gate held
//! for the whole read-modify-write sequence, so two concurrent registrations
//! cannot both take the last open slot.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::auth::Identity;
use crate::catalog::count_by_event;
use crate::models::{
    EventRegistrations, RegisteredEvent, Registration, RegistrationStatus, User,
};
use crate::store::RecordStore;
use crate::utils::AppError;

#[derive(Clone)]
pub struct RegistrationLedger {
    store: Arc<dyn RecordStore>,
    write_gate: Arc<Mutex<()>>,
}

impl RegistrationLedger {
    pub fn new(store: Arc<dyn RecordStore>, write_gate: Arc<Mutex<()>>) -> Self {
        Self { store, write_gate }
    }

    /// Registers the caller for an event, enforcing availability, the
    /// one-registration-per-attendee rule and the capacity limit.
    pub async fn register(
        &self,
        caller: &Identity,
        event_id: Uuid,
    ) -> Result<Registration, AppError> {
        let attendee = self.find_user(caller.id).await?;

        let _guard = self.write_gate.lock().await;

        let events = self.store.load_events().await?;
        let event = events
            .iter()
            .find(|event| event.id == event_id)
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        if !event.is_open() {
            return Err(AppError::NotAvailable);
        }

        let mut registrations = self.store.load_registrations().await?;

        let already = registrations
            .iter()
            .any(|reg| reg.event_id == event_id && reg.attendee_id == caller.id);
        if already {
            return Err(AppError::AlreadyRegistered);
        }

        if let Some(capacity) = event.capacity {
            let taken = registrations
                .iter()
                .filter(|reg| reg.event_id == event_id)
                .count();
            if taken >= capacity as usize {
                return Err(AppError::CapacityExceeded);
            }
        }

        let registration = Registration {
            id: Uuid::new_v4(),
            event_id,
            attendee_id: attendee.id,
            attendee_name: attendee.name,
            attendee_email: attendee.email,
            registered_at: Utc::now(),
            status: RegistrationStatus::Confirmed,
        };

        registrations.push(registration.clone());
        self.store.save_registrations(&registrations).await?;

        tracing::info!(
            registration_id = %registration.id,
            event_id = %event_id,
            attendee_id = %caller.id,
            "registration created"
        );
        Ok(registration)
    }

    /// Hard-deletes a registration owned by the caller.
    pub async fn cancel(&self, caller: &Identity, registration_id: Uuid) -> Result<(), AppError> {
        let _guard = self.write_gate.lock().await;

        let mut registrations = self.store.load_registrations().await?;
        let position = registrations
            .iter()
            .position(|reg| reg.id == registration_id && reg.attendee_id == caller.id)
            .ok_or_else(|| AppError::NotFound("Registration not found".to_string()))?;

        let removed = registrations.remove(position);
        self.store.save_registrations(&registrations).await?;

        tracing::info!(
            registration_id = %removed.id,
            event_id = %removed.event_id,
            "registration cancelled"
        );
        Ok(())
    }

    /// The caller's registrations joined with their events. Registrations
    /// whose event no longer exists are dropped, not reported as errors.
    pub async fn list_for_attendee(
        &self,
        caller: &Identity,
    ) -> Result<Vec<RegisteredEvent>, AppError> {
        let registrations = self.store.load_registrations().await?;
        let events = self.store.load_events().await?;

        Ok(registrations
            .into_iter()
            .filter(|reg| reg.attendee_id == caller.id)
            .filter_map(|reg| {
                let event = events.iter().find(|event| event.id == reg.event_id)?;
                Some(RegisteredEvent {
                    event: event.clone(),
                    registration_id: reg.id,
                    registered_at: reg.registered_at,
                    registration_status: reg.status,
                })
            })
            .collect())
    }

    /// All registrations for one event, visible only to its owner.
    pub async fn list_for_event(
        &self,
        caller: &Identity,
        event_id: Uuid,
    ) -> Result<EventRegistrations, AppError> {
        let events = self.store.load_events().await?;
        let event = events
            .iter()
            .find(|event| event.id == event_id)
            .ok_or_else(|| AppError::NotFound("Event not found".to_string()))?;

        if event.organizer_id != caller.id {
            return Err(AppError::Forbidden(
                "You can only view registrations for your own events".to_string(),
            ));
        }

        let registrations: Vec<Registration> = self
            .store
            .load_registrations()
            .await?
            .into_iter()
            .filter(|reg| reg.event_id == event_id)
            .collect();

        let total_registrations = registrations.len();
        Ok(EventRegistrations {
            event: event.into(),
            registrations,
            total_registrations,
        })
    }

    /// Current confirmed count for one event, recomputed from the ledger.
    pub async fn count_for_event(&self, event_id: Uuid) -> Result<usize, AppError> {
        let registrations = self.store.load_registrations().await?;
        Ok(count_by_event(&registrations)
            .get(&event_id)
            .copied()
            .unwrap_or(0))
    }

    async fn find_user(&self, id: Uuid) -> Result<User, AppError> {
        self.store
            .load_users()
            .await?
            .into_iter()
            .find(|user| user.id == id)
            .ok_or_else(|| AppError::NotFound("User not found".to_string()))
    }
}
