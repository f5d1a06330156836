//! Startup schema bootstrap
//!
//! Creates the tables when they are missing. There is no versioning: the
//! DDL is idempotent and safe to run on every start.

use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;

const SCHEMA: &str = include_str!("../sql/schema.sql");

/// Create the users, shows and user_shows tables if they do not exist
pub async fn ensure_schema(pool: &PgPool) -> DatabaseResult<()> {
    info!("Ensuring database schema");

    sqlx::raw_sql(SCHEMA)
        .execute(pool)
        .await
        .map_err(DatabaseError::Schema)?;

    info!("Database schema ready");
    Ok(())
}
