//! Event and registration models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Event entity
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Event {
    pub id: i32,
    pub creator: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

/// Row of the public event listing. Id and creator are left out on purpose.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct EventSummary {
    pub name: String,
    pub slug: String,
    pub description: String,
    pub created: DateTime<Utc>,
    pub updated: DateTime<Utc>,
}

impl From<&Event> for EventSummary {
    fn from(event: &Event) -> Self {
        Self {
            name: event.name.clone(),
            slug: event.slug.clone(),
            description: event.description.clone(),
            created: event.created,
            updated: event.updated,
        }
    }
}

/// New event creation payload, already validated and sanitized
#[derive(Debug, Clone)]
pub struct NewEvent {
    pub creator: i32,
    pub name: String,
    pub slug: String,
    pub description: String,
}

/// Registration of a user to an event
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, PartialEq)]
pub struct Registration {
    pub id: i32,
    pub user_id: i32,
    pub event_id: i32,
    pub comment: String,
    pub created: DateTime<Utc>,
}

/// New registration payload
#[derive(Debug, Clone)]
pub struct NewRegistration {
    pub user_id: i32,
    pub event_id: i32,
    pub comment: String,
}

/// Request for event creation
#[derive(Debug, Deserialize)]
pub struct CreateEventRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
}

/// Request for event update. Only the description may change.
#[derive(Debug, Deserialize)]
pub struct UpdateEventRequest {
    #[serde(default)]
    pub description: String,
}

/// Request for registering to an event
#[derive(Debug, Default, Deserialize)]
pub struct RegisterEventRequest {
    #[serde(default)]
    pub comment: String,
}
