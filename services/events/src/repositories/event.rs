//! Event and registration repository for database operations

use async_trait::async_trait;
use chrono::Utc;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::{PgExecutor, PgPool};
use tracing::{info, warn};

use super::EventStore;
use crate::models::{Event, EventSummary, NewEvent, NewRegistration, Registration};

/// Event repository
#[derive(Clone)]
pub struct EventRepository {
    pool: PgPool,
}

impl EventRepository {
    /// Create a new event repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

async fn delete_registrations_of<'e, E: PgExecutor<'e>>(
    executor: E,
    event_id: i32,
) -> DatabaseResult<u64> {
    let result = sqlx::query("DELETE FROM registrations WHERE event_id = $1")
        .bind(event_id)
        .execute(executor)
        .await
        .map_err(DatabaseError::from_query)?;

    Ok(result.rows_affected())
}

#[async_trait]
impl EventStore for EventRepository {
    async fn list(&self) -> DatabaseResult<Vec<EventSummary>> {
        sqlx::query_as::<_, EventSummary>(
            "SELECT name, slug, description, created, updated FROM events ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn find_by_id(&self, id: i32) -> DatabaseResult<Option<Event>> {
        sqlx::query_as::<_, Event>(
            r#"
            SELECT id, creator, name, slug, description, created, updated
            FROM events
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn create(&self, new_event: &NewEvent) -> DatabaseResult<Event> {
        info!(
            "Creating event {} for user {}",
            new_event.slug, new_event.creator
        );

        let now = Utc::now();
        sqlx::query_as::<_, Event>(
            r#"
            INSERT INTO events (creator, name, slug, description, created, updated)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING id, creator, name, slug, description, created, updated
            "#,
        )
        .bind(new_event.creator)
        .bind(&new_event.name)
        .bind(&new_event.slug)
        .bind(&new_event.description)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn update_description(
        &self,
        id: i32,
        description: &str,
    ) -> DatabaseResult<Option<Event>> {
        info!("Updating description of event {}", id);

        sqlx::query_as::<_, Event>(
            r#"
            UPDATE events
            SET description = $1, updated = $2
            WHERE id = $3
            RETURNING id, creator, name, slug, description, created, updated
            "#,
        )
        .bind(description)
        .bind(Utc::now())
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn delete(&self, id: i32) -> DatabaseResult<bool> {
        info!("Deleting event {} and its registrations", id);

        // Dropping the transaction on an early return rolls it back.
        let mut tx = self.pool.begin().await.map_err(DatabaseError::Connection)?;

        let registrations = delete_registrations_of(&mut *tx, id).await?;

        let deleted = sqlx::query("DELETE FROM events WHERE id = $1")
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(DatabaseError::from_query)?;

        tx.commit().await.map_err(DatabaseError::from_query)?;

        if deleted.rows_affected() == 0 {
            warn!("Event {} did not exist", id);
        } else {
            info!(
                "Deleted event {} with {} registrations",
                id, registrations
            );
        }

        Ok(deleted.rows_affected() > 0)
    }

    async fn register(&self, registration: &NewRegistration) -> DatabaseResult<Registration> {
        info!(
            "Registering user {} to event {}",
            registration.user_id, registration.event_id
        );

        sqlx::query_as::<_, Registration>(
            r#"
            INSERT INTO registrations (user_id, event_id, comment, created)
            VALUES ($1, $2, $3, $4)
            RETURNING id, user_id, event_id, comment, created
            "#,
        )
        .bind(registration.user_id)
        .bind(registration.event_id)
        .bind(&registration.comment)
        .bind(Utc::now())
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn unregister(&self, event_id: i32, user_id: i32) -> DatabaseResult<bool> {
        info!("Removing registration of user {} from event {}", user_id, event_id);

        let result = sqlx::query("DELETE FROM registrations WHERE event_id = $1 AND user_id = $2")
            .bind(event_id)
            .bind(user_id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::from_query)?;

        Ok(result.rows_affected() > 0)
    }

    async fn list_registrations(&self, event_id: i32) -> DatabaseResult<Vec<Registration>> {
        sqlx::query_as::<_, Registration>(
            r#"
            SELECT id, user_id, event_id, comment, created
            FROM registrations
            WHERE event_id = $1
            ORDER BY created
            "#,
        )
        .bind(event_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }

    async fn delete_registrations(&self, event_id: i32) -> DatabaseResult<u64> {
        delete_registrations_of(&self.pool, event_id).await
    }

    async fn is_registered(&self, event_id: i32, user_id: i32) -> DatabaseResult<bool> {
        sqlx::query_scalar(
            "SELECT EXISTS (SELECT 1 FROM registrations WHERE event_id = $1 AND user_id = $2)",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::from_query)
    }
}
