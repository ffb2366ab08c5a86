//! Events service models

pub mod event;
pub mod user;

// Re-export for convenience
pub use event::{
    CreateEventRequest, Event, EventSummary, NewEvent, NewRegistration, RegisterEventRequest,
    Registration, UpdateEventRequest,
};
pub use user::{LoginRequest, NewUser, RegisterRequest, TokenResponse, User, UserProfile};
