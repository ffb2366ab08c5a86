//! User routes: registration, login and profiles

use axum::{
    Extension, Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use tracing::{info, warn};

use crate::{
    error::{ApiError, ApiResult},
    extract::{ApiJson, ApiPath},
    models::{LoginRequest, NewUser, RegisterRequest, TokenResponse, User, UserProfile},
    policy,
    state::AppState,
    validation::{Validator, sanitize_name, validate_name, validate_password, validate_username},
};

/// Routes open to anyone
pub fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/users/register", post(register))
        .route("/users/login", post(login))
}

/// Routes behind the authentication middleware
pub fn protected_routes() -> Router<AppState> {
    Router::new()
        .route("/users", get(list_users))
        .route("/users/", get(list_users))
        .route("/users/me", get(me))
        .route("/users/:id", get(get_user))
}

/// Register a new user
pub async fn register(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<RegisterRequest>,
) -> ApiResult<impl IntoResponse> {
    let name = sanitize_name(&payload.name);
    let username = sanitize_name(&payload.username);

    // Limits apply to the escaped values, which are what gets stored
    Validator::new()
        .check("name", validate_name(&name))
        .check("username", validate_username(&username))
        .check("password", validate_password(&payload.password))
        .finish()?;

    let new_user = NewUser {
        name,
        username,
        password_hash: state.credentials.hash(&payload.password)?,
    };

    let user = state.users.create(&new_user).await.map_err(|e| {
        if e.is_conflict() {
            ApiError::Conflict("username already taken".to_string())
        } else {
            ApiError::Database(e)
        }
    })?;

    info!("Registered user {} ({})", user.username, user.id);

    Ok((
        StatusCode::CREATED,
        Json(json!({
            "id": user.id,
            "name": user.name,
            "username": user.username,
        })),
    ))
}

/// Exchange a username and password for a bearer token
pub async fn login(
    State(state): State<AppState>,
    ApiJson(payload): ApiJson<LoginRequest>,
) -> ApiResult<impl IntoResponse> {
    let username = sanitize_name(&payload.username);

    let user = state
        .users
        .find_by_username(&username)
        .await?
        .ok_or(ApiError::InvalidCredentials("no such user"))?;

    if !state.credentials.verify(&payload.password, &user.password_hash)? {
        warn!("Wrong password for user {}", user.username);
        return Err(ApiError::InvalidCredentials("invalid password"));
    }

    let token = state.jwt_service.issue(user.id)?;

    Ok((
        StatusCode::CREATED,
        Json(TokenResponse {
            token,
            expires_in: state.jwt_service.token_lifetime(),
        }),
    ))
}

/// List every username. Admins only.
pub async fn list_users(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
) -> ApiResult<impl IntoResponse> {
    let is_admin = state.users.is_admin(&user.username).await?.unwrap_or(false);
    policy::can_list_users(is_admin)?;

    let usernames = state.users.list_usernames().await?;

    Ok(Json(usernames))
}

/// Profile of the caller
pub async fn me(Extension(user): Extension<User>) -> Json<UserProfile> {
    Json(UserProfile::from(&user))
}

/// Profile of any user. Admins only.
pub async fn get_user(
    State(state): State<AppState>,
    Extension(user): Extension<User>,
    ApiPath(id): ApiPath<i32>,
) -> ApiResult<impl IntoResponse> {
    let is_admin = state.users.is_admin(&user.username).await?.unwrap_or(false);
    policy::can_view_user(is_admin)?;

    let target = state
        .users
        .find_by_id(id)
        .await?
        .ok_or_else(|| ApiError::NotFound("user not found".to_string()))?;

    Ok(Json(UserProfile::from(&target)))
}
