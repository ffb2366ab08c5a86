//! Authentication middleware for JWT token validation

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use tracing::warn;

use crate::{error::ApiError, state::AppState};

/// Require a valid bearer token resolving to an existing user.
///
/// On success the [`crate::models::User`] row is inserted into the request
/// extensions. The user is loaded again on every request, so a removed user
/// loses access immediately.
pub async fn require_authentication(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    // Extract the Authorization header
    let token = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .and_then(|header| header.strip_prefix("Bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(ApiError::InvalidToken)?;

    let claims = state.jwt_service.validate(token)?;

    let user = state.users.find_by_id(claims.sub).await?.ok_or_else(|| {
        warn!("Token subject {} no longer exists", claims.sub);
        ApiError::InvalidToken
    })?;

    req.extensions_mut().insert(user);

    Ok(next.run(req).await)
}
