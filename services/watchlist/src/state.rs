//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::repositories::{PgShowRepository, PgUserRepository, ShowRepository, UserRepository};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub show_repository: Arc<dyn ShowRepository>,
    pub user_repository: Arc<dyn UserRepository>,
}

impl AppState {
    pub fn new(
        show_repository: Arc<dyn ShowRepository>,
        user_repository: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            show_repository,
            user_repository,
        }
    }

    /// Both repositories over the same connection pool
    pub fn postgres(pool: PgPool) -> Self {
        Self::new(
            Arc::new(PgShowRepository::new(pool.clone())),
            Arc::new(PgUserRepository::new(pool)),
        )
    }
}
