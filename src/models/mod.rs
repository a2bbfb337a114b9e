pub mod event;
pub mod registration;
pub mod user;

pub use event::{Event, EventStatus, EventSummary};
pub use registration::{
    EventHeader, EventRegistrations, RegisteredEvent, Registration, RegistrationStatus,
};
pub use user::{Profile, PublicUser, Role, User};
