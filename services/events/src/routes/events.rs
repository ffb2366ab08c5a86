//! Event routes: listing, ownership-checked edits and attendance

use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, patch, post},
};
use common::error::DatabaseError;
use tracing::info;

use crate::{
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiJsonOrDefault, ApiPath},
    models::{
        CreateEventRequest, Event, NewEvent, NewRegistration, RegisterEventRequest,
        UpdateEventRequest, User,
    },
    policy,
    slug::slugify,
    state::AppState,
    validation::{
        Validator, sanitize_name, sanitize_text, strip_markup, validate_comment,
        validate_description, validate_name,
    },
};

/// Routes open to anyone
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/events", get(list_events))
        .route("/events/", get(list_events))
        .route("/events/:id", get(get_event))
}

/// Routes behind the authentication middleware
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/events", post(create_event))
        .route("/events/", post(create_event))
        .route("/events/:id", patch(update_event).delete(delete_event))
        .route(
            "/events/:id/register",
            post(register_for_event).delete(unregister_from_event),
        )
}

async fn load_event(state: &AppState, id: i32) -> ApiResult<Event> {
    state
        .events
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("event not found".to_string()))
}

fn conflict_or(err: DatabaseError, message: &str) -> ApiError {
    if err.is_conflict() {
        ApiError::Conflict(message.to_string())
    } else {
        ApiError::Database(err)
    }
}

/// List all events
pub async fn list_events(State(state): State<AppState>) -> ApiResult<impl IntoResponse> {
    let events = state.events.list().await?;
    Ok(Json(events))
}

/// Create an event owned by the caller
pub async fn create_event(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ApiJson(payload): ApiJson<CreateEventRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = sanitize_name(&payload.name);
    let description = sanitize_text(&payload.description);

    Validator::new()
        .check("name", validate_name(&name))
        .check("description", validate_description(&description))
        .finish()?;

    let new_event = NewEvent {
        creator: user.id,
        slug: slugify(&strip_markup(payload.name.trim())),
        name,
        description,
    };

    let event = state.events.create(&new_event).await?;

    info!("User {} created event {} ({})", user.id, event.slug, event.id);

    Ok((StatusCode::CREATED, Json(event)))
}

/// An event followed by its registrations
pub async fn get_event(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<impl IntoResponse> {
    let event = load_event(&state, id).await?;
    let registrations = state.events.list_registrations(id).await?;

    Ok(Json((event, registrations)))
}

/// Change the description of an event
pub async fn update_event(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ApiPath(id): ApiPath<i32>,
    ApiJson(payload): ApiJson<UpdateEventRequest>,
) -> ApiResult<impl IntoResponse> {
    let description = sanitize_text(&payload.description);

    Validator::new()
        .check("description", validate_description(&description))
        .finish()?;

    let event = load_event(&state, id).await?;
    policy::can_modify_event(&user, &event)?;

    if description.is_empty() || description == event.description {
        return Err(ApiError::BadRequest(
            "description is missing or unchanged".to_string(),
        ));
    }

    let updated = state
        .events
        .update_description(id, &description)
        .await?
        .ok_or_else(|| ApiError::NotFound("event not found".to_string()))?;

    Ok(Json(updated))
}

/// Delete an event and its registrations
pub async fn delete_event(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<impl IntoResponse> {
    let event = load_event(&state, id).await?;
    policy::can_modify_event(&user, &event)?;

    if !state.events.delete(id).await? {
        return Err(ApiError::NotFound("event not found".to_string()));
    }

    info!("User {} deleted event {}", user.id, id);

    Ok(StatusCode::NO_CONTENT)
}

/// Register the caller to an event
pub async fn register_for_event(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ApiPath(id): ApiPath<i32>,
    ApiJsonOrDefault(payload): ApiJsonOrDefault<RegisterEventRequest>,
) -> ApiResult<impl IntoResponse> {
    let comment = sanitize_text(&payload.comment);

    Validator::new()
        .check("comment", validate_comment(&comment))
        .finish()?;

    let event = load_event(&state, id).await?;

    let registration = state
        .events
        .register(&NewRegistration {
            user_id: user.id,
            event_id: event.id,
            comment,
        })
        .await
        .map_err(|e| conflict_or(e, "already registered to this event"))?;

    Ok((StatusCode::CREATED, Json(registration)))
}

/// Withdraw the caller's registration
pub async fn unregister_from_event(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<impl IntoResponse> {
    let event = load_event(&state, id).await?;

    let is_registered = state.events.is_registered(event.id, user.id).await?;
    policy::can_unregister(is_registered)?;

    state.events.unregister(event.id, user.id).await?;

    Ok(StatusCode::NO_CONTENT)
}
