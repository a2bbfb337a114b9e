//! Auth gate: bearer token issue/verify and password hashing.
//!
//! Verification is stateless; the identity payload is self-contained in the
//! token, so a user removed after issuance stays valid until the token
//! expires. Known limitation, accepted for this service.

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::{Role, User};
use crate::state::AppState;
use crate::utils::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: Uuid,
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// Signing and verification keys plus the token lifetime.
pub struct TokenKeys {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl TokenKeys {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret.as_bytes()),
            decoding: DecodingKey::from_secret(secret.as_bytes()),
            ttl,
        }
    }

    pub fn issue(&self, user: &User) -> Result<String, AppError> {
        let now = Utc::now();
        let claims = Claims {
            sub: user.id,
            email: user.email.clone(),
            role: user.role,
            iat: now.timestamp(),
            exp: (now + self.ttl).timestamp(),
        };
        encode(&Header::default(), &claims, &self.encoding)
            .map_err(|err| AppError::Internal(format!("token signing failed: {err}")))
    }

    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding, &Validation::default())
            .map(|data| data.claims)
            .map_err(|_| AppError::InvalidCredential)
    }
}

/// Verified caller identity extracted from the `Authorization` header.
#[derive(Debug, Clone)]
pub struct Identity {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

impl Identity {
    pub fn require(self, role: Role) -> Result<Self, AppError> {
        if self.role == role {
            Ok(self)
        } else {
            Err(AppError::Forbidden(format!(
                "Access denied. {} role required",
                capitalize(role.as_str())
            )))
        }
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[async_trait]
impl FromRequestParts<AppState> for Identity {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or(AppError::MissingCredential)?;
        let token = header
            .strip_prefix("Bearer ")
            .ok_or(AppError::MissingCredential)?;

        let claims = state.keys.verify(token)?;
        Ok(Identity {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        })
    }
}

/// Identity refined to the organizer role; rejects other callers with 403.
pub struct OrganizerUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for OrganizerUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let identity = Identity::from_request_parts(parts, state).await?;
        Ok(Self(identity.require(Role::Organizer)?))
    }
}

/// Identity refined to the attendee role; rejects other callers with 403.
pub struct AttendeeUser(pub Identity);

#[async_trait]
impl FromRequestParts<AppState> for AttendeeUser {
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, AppError> {
        let identity = Identity::from_request_parts(parts, state).await?;
        Ok(Self(identity.require(Role::Attendee)?))
    }
}

/// Bcrypt is CPU-bound; both directions run on the blocking pool.
pub async fn hash_password(password: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::hash(password, bcrypt::DEFAULT_COST))
        .await
        .map_err(|err| AppError::Internal(format!("hash task failed: {err}")))?
        .map_err(|err| AppError::Internal(format!("password hashing failed: {err}")))
}

pub async fn verify_password(password: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
        .await
        .map_err(|err| AppError::Internal(format!("hash task failed: {err}")))?
        .map_err(|err| AppError::Internal(format!("password verification failed: {err}")))
}

#[cfg(test)]
mod tests {
    use crate::models::Profile;

    use super::*;

    fn sample_user(role: Role) -> User {
        User {
            id: Uuid::new_v4(),
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: String::new(),
            role,
            profile: Profile::empty_for(role),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn issued_token_verifies_to_matching_identity() {
        let keys = TokenKeys::new("test-secret", Duration::days(7));
        let user = sample_user(Role::Organizer);

        let token = keys.issue(&user).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.email, user.email);
        assert_eq!(claims.role, Role::Organizer);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let keys = TokenKeys::new("secret-a", Duration::days(7));
        let other = TokenKeys::new("secret-b", Duration::days(7));
        let token = keys.issue(&sample_user(Role::Attendee)).unwrap();

        assert!(matches!(
            other.verify(&token),
            Err(AppError::InvalidCredential)
        ));
    }

    #[test]
    fn expired_token_is_rejected() {
        let keys = TokenKeys::new("test-secret", Duration::days(-1));
        let token = keys.issue(&sample_user(Role::Attendee)).unwrap();

        assert!(matches!(keys.verify(&token), Err(AppError::InvalidCredential)));
    }

    #[test]
    fn require_role_rejects_the_other_role() {
        let identity = Identity {
            id: Uuid::new_v4(),
            email: "ada@example.com".to_string(),
            role: Role::Attendee,
        };
        assert!(identity.clone().require(Role::Attendee).is_ok());
        assert!(matches!(
            identity.require(Role::Organizer),
            Err(AppError::Forbidden(_))
        ));
    }

    #[tokio::test]
    async fn password_hash_round_trip() {
        let hash = hash_password("hunter22".to_string()).await.unwrap();
        assert_ne!(hash, "hunter22");
        assert!(verify_password("hunter22".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!verify_password("wrong".to_string(), hash).await.unwrap());
    }
}
