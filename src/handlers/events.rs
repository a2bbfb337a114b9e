use axum::extract::{Path, State};
use axum::response::Response;
use axum::Json;
use uuid::Uuid;

use crate::auth::{AttendeeUser, Identity, OrganizerUser};
use crate::catalog::CreateEvent;
use crate::state::AppState;
use crate::utils::response::{created, empty_success, success};
use crate::utils::AppError;

pub async fn create_event(
    State(state): State<AppState>,
    OrganizerUser(caller): OrganizerUser,
    Json(input): Json<CreateEvent>,
) -> Result<Response, AppError> {
    let event = state.catalog.create(&caller, input).await?;
    Ok(created(event, "Event created successfully"))
}

pub async fn my_events(
    State(state): State<AppState>,
    OrganizerUser(caller): OrganizerUser,
) -> Result<Response, AppError> {
    let events = state.catalog.list_owned(&caller).await?;
    Ok(success(events, "Events retrieved successfully"))
}

pub async fn public_events(
    State(state): State<AppState>,
    _caller: Identity,
) -> Result<Response, AppError> {
    let events = state.catalog.list_public().await?;
    Ok(success(events, "Events retrieved successfully"))
}

pub async fn register_for_event(
    State(state): State<AppState>,
    AttendeeUser(caller): AttendeeUser,
    Path(event_id): Path<String>,
) -> Result<Response, AppError> {
    // An unparseable id cannot name any event.
    let event_id = Uuid::parse_str(&event_id)
        .map_err(|_| AppError::NotFound("Event not found".to_string()))?;

    let registration = state.ledger.register(&caller, event_id).await?;
    Ok(created(registration, "Successfully registered for event"))
}

pub async fn my_registrations(
    State(state): State<AppState>,
    AttendeeUser(caller): AttendeeUser,
) -> Result<Response, AppError> {
    let registered = state.ledger.list_for_attendee(&caller).await?;
    Ok(success(registered, "Registrations retrieved successfully"))
}

pub async fn event_registrations(
    State(state): State<AppState>,
    OrganizerUser(caller): OrganizerUser,
    Path(event_id): Path<String>,
) -> Result<Response, AppError> {
    let event_id = Uuid::parse_str(&event_id)
        .map_err(|_| AppError::NotFound("Event not found".to_string()))?;

    let listing = state.ledger.list_for_event(&caller, event_id).await?;
    Ok(success(listing, "Registrations retrieved successfully"))
}

pub async fn cancel_registration(
    State(state): State<AppState>,
    AttendeeUser(caller): AttendeeUser,
    Path(registration_id): Path<String>,
) -> Result<Response, AppError> {
    let registration_id = Uuid::parse_str(&registration_id)
        .map_err(|_| AppError::NotFound("Registration not found".to_string()))?;

    state.ledger.cancel(&caller, registration_id).await?;
    Ok(empty_success("Registration cancelled successfully"))
}
