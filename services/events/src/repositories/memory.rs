//! In-memory stores used by the handler tests

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use std::sync::Mutex;

use super::{EventStore, UserStore};
use crate::models::{Event, EventSummary, NewEvent, NewRegistration, NewUser, Registration, User};

#[derive(Default)]
struct Tables {
    users: Vec<User>,
    events: Vec<Event>,
    registrations: Vec<Registration>,
    next_id: i32,
}

impl Tables {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Both stores over one set of tables, mirroring one database
#[derive(Default)]
pub struct MemoryStore {
    tables: Mutex<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the admin flag of an existing user
    pub fn set_admin(&self, user_id: i32, is_admin: bool) {
        let mut tables = self.tables.lock().unwrap();
        if let Some(user) = tables.users.iter_mut().find(|u| u.id == user_id) {
            user.is_admin = is_admin;
        }
    }

    /// Drop a user row, leaving the rest untouched
    pub fn remove_user(&self, user_id: i32) {
        self.tables.lock().unwrap().users.retain(|u| u.id != user_id);
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn find_by_username(&self, username: &str) -> DatabaseResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.username == username).cloned())
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<User>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }

    async fn list_usernames(&self) -> DatabaseResult<Vec<String>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.users.iter().map(|u| u.username.clone()).collect())
    }

    async fn is_admin(&self, username: &str) -> DatabaseResult<Option<bool>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .users
            .iter()
            .find(|u| u.username == username)
            .map(|u| u.is_admin))
    }

    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let mut tables = self.tables.lock().unwrap();
        if tables.users.iter().any(|u| u.username == new_user.username) {
            return Err(DatabaseError::Conflict("users_username_key".to_string()));
        }

        let user = User {
            id: tables.next_id(),
            name: new_user.name.clone(),
            username: new_user.username.clone(),
            password_hash: new_user.password_hash.clone(),
            is_admin: false,
        };
        tables.users.push(user.clone());
        Ok(user)
    }
}

#[async_trait]
impl EventStore for MemoryStore {
    async fn list(&self) -> DatabaseResult<Vec<EventSummary>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.events.iter().map(EventSummary::from).collect())
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Event>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables.events.iter().find(|e| e.id == id).cloned())
    }

    async fn create(&self, new_event: &NewEvent) -> DatabaseResult<Event> {
        let mut tables = self.tables.lock().unwrap();
        let now = Utc::now();
        let event = Event {
            id: tables.next_id(),
            creator: new_event.creator,
            name: new_event.name.clone(),
            slug: new_event.slug.clone(),
            description: new_event.description.clone(),
            created: now,
            updated: now,
        };
        tables.events.push(event.clone());
        Ok(event)
    }

    async fn update_description(
        &self,
        id: i32,
        description: &str,
    ) -> DatabaseResult<Option<Event>> {
        let mut tables = self.tables.lock().unwrap();
        Ok(tables.events.iter_mut().find(|e| e.id == id).map(|event| {
            event.description = description.to_string();
            event.updated = Utc::now();
            event.clone()
        }))
    }

    async fn delete(&self, id: i32) -> DatabaseResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        tables.registrations.retain(|r| r.event_id != id);
        let before = tables.events.len();
        tables.events.retain(|e| e.id != id);
        Ok(tables.events.len() < before)
    }

    async fn register(&self, registration: &NewRegistration) -> DatabaseResult<Registration> {
        let mut tables = self.tables.lock().unwrap();
        let duplicate = tables
            .registrations
            .iter()
            .any(|r| r.event_id == registration.event_id && r.user_id == registration.user_id);
        if duplicate {
            return Err(DatabaseError::Conflict(
                "registrations_event_user_key".to_string(),
            ));
        }

        let row = Registration {
            id: tables.next_id(),
            user_id: registration.user_id,
            event_id: registration.event_id,
            comment: registration.comment.clone(),
            created: Utc::now(),
        };
        tables.registrations.push(row.clone());
        Ok(row)
    }

    async fn unregister(&self, event_id: i32, user_id: i32) -> DatabaseResult<bool> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.registrations.len();
        tables
            .registrations
            .retain(|r| !(r.event_id == event_id && r.user_id == user_id));
        Ok(tables.registrations.len() < before)
    }

    async fn list_registrations(&self, event_id: i32) -> DatabaseResult<Vec<Registration>> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .registrations
            .iter()
            .filter(|r| r.event_id == event_id)
            .cloned()
            .collect())
    }

    async fn delete_registrations(&self, event_id: i32) -> DatabaseResult<u64> {
        let mut tables = self.tables.lock().unwrap();
        let before = tables.registrations.len();
        tables.registrations.retain(|r| r.event_id != event_id);
        Ok((before - tables.registrations.len()) as u64)
    }

    async fn is_registered(&self, event_id: i32, user_id: i32) -> DatabaseResult<bool> {
        let tables = self.tables.lock().unwrap();
        Ok(tables
            .registrations
            .iter()
            .any(|r| r.event_id == event_id && r.user_id == user_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_delete_registrations_only_touches_one_event() {
        let store = MemoryStore::new();
        for (user_id, event_id) in [(1, 10), (2, 10), (1, 11)] {
            store
                .register(&NewRegistration {
                    user_id,
                    event_id,
                    comment: String::new(),
                })
                .await
                .unwrap();
        }

        assert_eq!(store.delete_registrations(10).await.unwrap(), 2);
        assert!(store.list_registrations(10).await.unwrap().is_empty());
        assert!(store.is_registered(11, 1).await.unwrap());
    }
}
