//! Common library for the event registry
//!
//! This crate provides the database plumbing shared by the services in the
//! workspace: pool configuration and construction, health checks, and the
//! typed error returned by every data access call.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, health_check, init_pool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     assert!(health_check(&pool).await);
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
