use std::sync::Arc;

use anyhow::Result;
use common::database::{health_check, init_pool};
use tokio::net::TcpListener;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod config;
mod credentials;
mod error;
mod extract;
mod jwt;
mod middleware;
mod models;
mod policy;
mod repositories;
mod routes;
mod slug;
mod state;
mod validation;

use crate::{
    config::AppConfig,
    credentials::CredentialStore,
    jwt::JwtService,
    repositories::{EventRepository, UserRepository},
    state::AppState,
};

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Starting events service");

    let config = AppConfig::from_env()?;

    // Initialize database connection pool
    let pool = init_pool(&config.database).await?;

    if health_check(&pool).await {
        info!("Database connection successful");
    } else {
        anyhow::bail!("Failed to connect to database");
    }

    let app_state = AppState {
        users: Arc::new(UserRepository::new(pool.clone())),
        events: Arc::new(EventRepository::new(pool.clone())),
        credentials: CredentialStore::new(&config.password)?,
        jwt_service: JwtService::new(config.jwt),
    };

    let app = routes::create_router(app_state);

    let address = config.server.address();
    let listener = TcpListener::bind(&address).await?;
    info!("Events service listening on {}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Events service stopped");

    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!("Shutdown signal received");
}
