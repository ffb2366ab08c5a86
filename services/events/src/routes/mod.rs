//! HTTP routes for the events service

use std::any::Any;

use axum::{
    Json, Router, middleware,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde_json::json;
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};
use tracing::error;

use crate::{error::ApiError, middleware::require_authentication, state::AppState};

pub mod events;
pub mod users;


/// Create the router for the events service
pub fn create_router(state: AppState) -> Router {
    let protected = Router::new()
        .merge(users::protected_routes())
        .merge(events::protected_routes())
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_authentication,
        ));

    Router::new()
        .route("/", get(index))
        .route("/health", get(health_check))
        .merge(users::public_routes())
        .merge(events::public_routes())
        .merge(protected)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Map of the available endpoints
pub async fn index() -> impl IntoResponse {
    Json(json!({
        "/": "GET",
        "/health": "GET",
        "/users/register": "POST",
        "/users/login": "POST",
        "/users/": "GET",
        "/users/me": "GET",
        "/users/:id": "GET",
        "/events/": ["GET", "POST"],
        "/events/:id": ["GET", "PATCH", "DELETE"],
        "/events/:id/register": ["POST", "DELETE"],
    }))
}

/// Health check endpoint
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "service": "events-service"
    }))
}

async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, Json(json!({ "error": "Not found" })))
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };

    error!("Handler panicked: {}", detail);

    ApiError::InternalServerError.into_response()
}
