use axum::extract::State;
use axum::response::Response;
use axum::Json;
use serde::Deserialize;

use crate::auth::Identity;
use crate::models::{Profile, PublicUser};
use crate::state::AppState;
use crate::utils::response::success;
use crate::utils::AppError;

/// Only the display name and the role-specific profile are mutable.
/// Email, role, password and timestamps never change through this endpoint.
#[derive(Deserialize)]
pub struct UpdateProfileRequest {
    pub name: Option<String>,
    pub profile: Option<Profile>,
}

pub async fn get_profile(
    State(state): State<AppState>,
    caller: Identity,
) -> Result<Response, AppError> {
    let user = state
        .store
        .load_users()
        .await?
        .into_iter()
        .find(|user| user.id == caller.id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(success(PublicUser::from(user), "Profile retrieved successfully"))
}

pub async fn update_profile(
    State(state): State<AppState>,
    caller: Identity,
    Json(input): Json<UpdateProfileRequest>,
) -> Result<Response, AppError> {
    let _guard = state.write_gate.lock().await;

    let mut users = state.store.load_users().await?;
    let user = users
        .iter_mut()
        .find(|user| user.id == caller.id)
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    if let Some(name) = input.name {
        if name.trim().is_empty() {
            return Err(AppError::Validation("Name cannot be empty".to_string()));
        }
        user.name = name;
    }

    if let Some(profile) = input.profile {
        if !profile.matches_role(user.role) {
            return Err(AppError::Validation(
                "Profile does not match your role".to_string(),
            ));
        }
        user.profile = profile;
    }

    let updated = user.clone();
    state.store.save_users(&users).await?;

    Ok(success(
        PublicUser::from(updated),
        "Profile updated successfully",
    ))
}
