use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Organizer,
    Attendee,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Organizer => "organizer",
            Role::Attendee => "attendee",
        }
    }
}

/// Role-specific profile data. The variant must match the user's role;
/// registration and profile updates reject a mismatched kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum Profile {
    Organizer {
        #[serde(default)]
        organization_name: Option<String>,
        #[serde(default)]
        contact_info: Option<String>,
        #[serde(default)]
        event_types: Vec<String>,
    },
    Attendee {
        #[serde(default)]
        interests: Vec<String>,
        #[serde(default)]
        location: Option<String>,
    },
}

impl Profile {
    pub fn empty_for(role: Role) -> Self {
        match role {
            Role::Organizer => Profile::Organizer {
                organization_name: None,
                contact_info: None,
                event_types: Vec::new(),
            },
            Role::Attendee => Profile::Attendee {
                interests: Vec::new(),
                location: None,
            },
        }
    }

    pub fn matches_role(&self, role: Role) -> bool {
        matches!(
            (self, role),
            (Profile::Organizer { .. }, Role::Organizer)
                | (Profile::Attendee { .. }, Role::Attendee)
        )
    }
}

/// Stored user record. The password hash is persisted but must never reach
/// an API response; hand out a [`PublicUser`] instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub profile: Profile,
    pub created_at: DateTime<Utc>,
}

impl From<User> for PublicUser {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            profile: user.profile,
            created_at: user.created_at,
        }
    }
}
