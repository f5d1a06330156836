//! Show repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::ShowRepository;
use crate::models::{GenreFilter, NewShow, Show, User};

/// Show repository backed by PostgreSQL
#[derive(Clone)]
pub struct PgShowRepository {
    pool: PgPool,
}

impl PgShowRepository {
    /// Create a new show repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShowRepository for PgShowRepository {
    async fn find_all(&self) -> DatabaseResult<Vec<Show>> {
        sqlx::query_as::<_, Show>(
            r#"
            SELECT id, title, genre, rating, available, status, created_at, updated_at
            FROM shows
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Show>> {
        sqlx::query_as::<_, Show>(
            r#"
            SELECT id, title, genre, rating, available, status, created_at, updated_at
            FROM shows
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn find_by_genre(&self, filter: &GenreFilter) -> DatabaseResult<Vec<Show>> {
        sqlx::query_as::<_, Show>(
            r#"
            SELECT id, title, genre, rating, available, status, created_at, updated_at
            FROM shows
            WHERE genre ILIKE $1 ESCAPE '\'
            ORDER BY created_at ASC
            "#,
        )
        .bind(filter.like_pattern())
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn create(&self, new_show: &NewShow) -> DatabaseResult<Show> {
        let show = Show::from_new(new_show);
        info!("Creating show {} ({})", show.title, show.id);

        sqlx::query_as::<_, Show>(
            r#"
            INSERT INTO shows (id, title, genre, rating, available, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING id, title, genre, rating, available, status, created_at, updated_at
            "#,
        )
        .bind(show.id)
        .bind(&show.title)
        .bind(&show.genre)
        .bind(&show.rating)
        .bind(show.available)
        .bind(&show.status)
        .bind(show.created_at)
        .bind(show.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn save(&self, show: &Show) -> DatabaseResult<Show> {
        sqlx::query_as::<_, Show>(
            r#"
            UPDATE shows
            SET title = $2, genre = $3, rating = $4, available = $5, status = $6,
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, title, genre, rating, available, status, created_at, updated_at
            "#,
        )
        .bind(show.id)
        .bind(&show.title)
        .bind(&show.genre)
        .bind(&show.rating)
        .bind(show.available)
        .bind(&show.status)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<()> {
        info!("Deleting show {}", id);

        // user_shows rows go with it through ON DELETE CASCADE
        sqlx::query("DELETE FROM shows WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(())
    }

    async fn users_of(&self, show_id: Uuid) -> DatabaseResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT u.id, u.username, u.email, u.created_at, u.updated_at
            FROM users u
            JOIN user_shows us ON us.user_id = u.id
            WHERE us.show_id = $1
            ORDER BY u.created_at ASC
            "#,
        )
        .bind(show_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }
}
