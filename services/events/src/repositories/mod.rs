//! Repositories for database operations
//!
//! Handlers talk to the stores through these traits so the router can run
//! against PostgreSQL in production and against memory in tests.

use async_trait::async_trait;
use common::error::DatabaseResult;

use crate::models::{Event, EventSummary, NewEvent, NewRegistration, NewUser, Registration, User};

pub mod event;
#[cfg(test)]
pub mod memory;
pub mod user;

pub use event::EventRepository;
pub use user::UserRepository;

/// Access to the `users` table
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Find a user by username
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>>;

    /// Find a user by ID
    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<User>>;

    /// List every username
    async fn list_usernames(&self) -> DatabaseResult<Vec<String>>;

    /// Admin flag of a user, `None` when there is no such user
    async fn is_admin(&self, username: &str) -> DatabaseResult<Option<bool>>;

    /// Create a new user. A taken username is a conflict.
    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;
}

/// Access to the `events` and `registrations` tables
#[async_trait]
pub trait EventStore: Send + Sync {
    /// List all events without ids or creators
    async fn list(&self) -> DatabaseResult<Vec<EventSummary>>;

    /// Find an event by ID
    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Event>>;

    /// Create a new event
    async fn create(&self, new_event: &NewEvent) -> DatabaseResult<Event>;

    /// Replace the description and bump the updated timestamp
    async fn update_description(&self, id: i32, description: &str)
    -> DatabaseResult<Option<Event>>;

    /// Delete an event together with its registrations, atomically.
    /// Returns whether the event existed.
    async fn delete(&self, id: i32) -> DatabaseResult<bool>;

    /// Register a user to an event. A second registration is a conflict.
    async fn register(&self, registration: &NewRegistration) -> DatabaseResult<Registration>;

    /// Remove a user's registration. Returns whether one was removed.
    async fn unregister(&self, event_id: i32, user_id: i32) -> DatabaseResult<bool>;

    /// List the registrations of an event
    async fn list_registrations(&self, event_id: i32) -> DatabaseResult<Vec<Registration>>;

    /// Remove every registration of an event, returning how many went
    async fn delete_registrations(&self, event_id: i32) -> DatabaseResult<u64>;

    /// Whether the user is registered to the event
    async fn is_registered(&self, event_id: i32, user_id: i32) -> DatabaseResult<bool>;
}
