use axum::extract::State;
use axum::response::Response;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::{hash_password, verify_password, Identity};
use crate::models::{Profile, PublicUser, Role, User};
use crate::state::AppState;
use crate::utils::response::{created, success};
use crate::utils::AppError;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub role: String,
    pub profile: Option<Profile>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Token plus the public view of the user, returned by register and login.
#[derive(Serialize)]
struct AuthData {
    token: String,
    user: PublicUser,
}

pub async fn register(
    State(state): State<AppState>,
    Json(input): Json<RegisterRequest>,
) -> Result<Response, AppError> {
    let role = validate_registration(&input)?;

    let profile = match input.profile {
        Some(profile) if profile.matches_role(role) => profile,
        Some(_) => {
            return Err(AppError::Validation(
                "Profile does not match the selected role".to_string(),
            ))
        }
        None => Profile::empty_for(role),
    };

    let _guard = state.write_gate.lock().await;

    let mut users = state.store.load_users().await?;
    if users.iter().any(|user| user.email == input.email) {
        return Err(AppError::Validation(
            "User already exists with this email".to_string(),
        ));
    }

    let password_hash = hash_password(input.password).await?;

    let user = User {
        id: Uuid::new_v4(),
        name: input.name,
        email: input.email,
        password_hash,
        role,
        profile,
        created_at: Utc::now(),
    };

    users.push(user.clone());
    state.store.save_users(&users).await?;

    let token = state.keys.issue(&user)?;
    tracing::info!(user_id = %user.id, role = user.role.as_str(), "user registered");

    Ok(created(
        AuthData {
            token,
            user: user.into(),
        },
        "User registered successfully",
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> Result<Response, AppError> {
    if input.email.trim().is_empty() || input.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }

    let users = state.store.load_users().await?;
    // Uniform rejection for unknown email and wrong password alike; the
    // response must not reveal which one failed.
    let user = users
        .into_iter()
        .find(|user| user.email == input.email)
        .ok_or_else(invalid_credentials)?;

    let matches = verify_password(input.password, user.password_hash.clone()).await?;
    if !matches {
        return Err(invalid_credentials());
    }

    let token = state.keys.issue(&user)?;
    tracing::info!(user_id = %user.id, "user logged in");

    Ok(success(
        AuthData {
            token,
            user: user.into(),
        },
        "Login successful",
    ))
}

pub async fn me(
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

    Ok(success(PublicUser::from(user), "User retrieved successfully"))
}

fn validate_registration(input: &RegisterRequest) -> Result<Role, AppError> {
    if input.name.trim().is_empty() {
        return Err(AppError::Validation("Name is required".to_string()));
    }
    if !input.email.contains('@') {
        return Err(AppError::Validation(
            "Please include a valid email".to_string(),
        ));
    }
    if input.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    match input.role.as_str() {
        "organizer" => Ok(Role::Organizer),
        "attendee" => Ok(Role::Attendee),
        _ => Err(AppError::Validation(
            "Role must be organizer or attendee".to_string(),
        )),
    }
}

fn invalid_credentials() -> AppError {
    AppError::Validation("Invalid credentials".to_string())
}
