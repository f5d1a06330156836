//! User repository for database operations

use async_trait::async_trait;
use common::error::{DatabaseError, DatabaseResult};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use super::UserRepository;
use crate::models::{NewUser, Show, User};

/// User repository backed by PostgreSQL
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new user repository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_all(&self) -> DatabaseResult<Vec<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, created_at, updated_at
            FROM users
            ORDER BY created_at ASC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>> {
        sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User> {
        let user = User::from_new(new_user);
        info!("Creating new user: {}", user.username);

        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .bind(user.created_at)
        .bind(user.updated_at)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn save(&self, user: &User) -> DatabaseResult<User> {
        sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = $2, email = $3, updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, email, created_at, updated_at
            "#,
        )
        .bind(user.id)
        .bind(&user.username)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn delete(&self, id: Uuid) -> DatabaseResult<()> {
        info!("Deleting user {}", id);

        sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(DatabaseError::Query)?;

        Ok(())
    }

    async fn shows_of(&self, user_id: Uuid) -> DatabaseResult<Vec<Show>> {
        sqlx::query_as::<_, Show>(
            r#"
            SELECT s.id, s.title, s.genre, s.rating, s.available, s.status,
                   s.created_at, s.updated_at
            FROM shows s
            JOIN user_shows us ON us.show_id = s.id
            WHERE us.user_id = $1
            ORDER BY s.created_at ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .map_err(DatabaseError::Query)
    }

    async fn add_show(&self, user_id: Uuid, show_id: Uuid) -> DatabaseResult<()> {
        info!("Adding show {} to watch list of user {}", show_id, user_id);

        sqlx::query(
            r#"
            INSERT INTO user_shows (user_id, show_id)
            VALUES ($1, $2)
            ON CONFLICT (user_id, show_id) DO NOTHING
            "#,
        )
        .bind(user_id)
        .bind(show_id)
        .execute(&self.pool)
        .await
        .map_err(DatabaseError::Query)?;

        Ok(())
    }
}
