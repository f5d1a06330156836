//! Common library for the watchlist service
//!
//! This crate provides the shared persistence plumbing: PostgreSQL pool
//! configuration and lifecycle, and the error type every repository
//! reports.
//!
//! ```rust,no_run
//! use common::database::{DatabaseConfig, close_pool, health_check, init_pool};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env()?;
//!     let pool = init_pool(&config).await?;
//!     assert!(health_check(&pool).await?);
//!     close_pool(pool).await;
//!     Ok(())
//! }
//! ```

pub mod database;
pub mod error;
