//! Watchlist service
//!
//! HTTP CRUD over users and shows with a many-to-many watch list between
//! them, backed by PostgreSQL.

pub mod error;
pub mod models;
pub mod repositories;
pub mod routes;
pub mod schema;
pub mod settings;
pub mod state;
pub mod validation;
