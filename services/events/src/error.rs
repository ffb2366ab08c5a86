//! Custom error types for the events service

use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use common::error::DatabaseError;
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::{credentials::CredentialError, jwt::TokenError, policy::Denied, validation::FieldError};

/// Custom error type for the events service
#[derive(Error, Debug)]
pub enum ApiError {
    /// One or more request fields failed validation
    #[error("Validation failed")]
    Validation(Vec<FieldError>),

    /// Bad request with message
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The caller is authenticated but may not do this
    #[error("Denied: {0}")]
    Denied(&'static str),

    /// Missing, malformed or unverifiable token
    #[error("Invalid token")]
    InvalidToken,

    /// Well formed token past its expiry
    #[error("Expired token")]
    ExpiredToken,

    /// Login failed
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(&'static str),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// The write collides with an existing row
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Internal server error
    #[error("Internal server error")]
    InternalServerError,

    /// Database error
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) | ApiError::BadRequest(_) | ApiError::Denied(_) => {
                StatusCode::BAD_REQUEST
            }
            ApiError::InvalidToken | ApiError::ExpiredToken | ApiError::InvalidCredentials(_) => {
                StatusCode::UNAUTHORIZED
            }
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InternalServerError | ApiError::Database(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        let body = match self {
            ApiError::Validation(errors) => json!({
                "error": "validation failed",
                "errors": errors,
            }),
            ApiError::InvalidToken => json!({
                "error": "invalid token",
                "code": "invalid_token",
            }),
            ApiError::ExpiredToken => json!({
                "error": "expired token",
                "code": "token_expired",
            }),
            ApiError::BadRequest(msg) | ApiError::NotFound(msg) | ApiError::Conflict(msg) => {
                json!({ "error": msg })
            }
            ApiError::Denied(reason) | ApiError::InvalidCredentials(reason) => {
                json!({ "error": reason })
            }
            ApiError::InternalServerError => json!({ "error": "Internal server error" }),
            ApiError::Database(e) => {
                error!("Database error: {}", e);
                json!({ "error": "Database error" })
            }
        };

        (status, Json(body)).into_response()
    }
}

impl From<Denied> for ApiError {
    fn from(denied: Denied) -> Self {
        ApiError::Denied(denied.0)
    }
}

impl From<Vec<FieldError>> for ApiError {
    fn from(errors: Vec<FieldError>) -> Self {
        ApiError::Validation(errors)
    }
}

impl From<TokenError> for ApiError {
    fn from(err: TokenError) -> Self {
        match err {
            TokenError::Expired => ApiError::ExpiredToken,
            TokenError::Invalid(_) => ApiError::InvalidToken,
            TokenError::Issue(_) | TokenError::Configuration(_) => {
                error!("Token service failure: {}", err);
                ApiError::InternalServerError
            }
        }
    }
}

impl From<CredentialError> for ApiError {
    fn from(err: CredentialError) -> Self {
        error!("Credential store failure: {}", err);
        ApiError::InternalServerError
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        warn!("Rejected request body: {}", rejection.body_text());
        ApiError::BadRequest("invalid json".to_string())
    }
}

impl From<PathRejection> for ApiError {
    fn from(rejection: PathRejection) -> Self {
        warn!("Rejected path parameters: {}", rejection.body_text());
        ApiError::BadRequest("invalid id".to_string())
    }
}

/// Type alias for API results
pub type ApiResult<T> = Result<T, ApiError>;
