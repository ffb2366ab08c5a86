//! Application state shared across handlers

use std::sync::Arc;

use crate::{
    credentials::CredentialStore,
    jwt::JwtService,
    repositories::{EventStore, UserStore},
};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub events: Arc<dyn EventStore>,
    pub credentials: CredentialStore,
    pub jwt_service: JwtService,
}
