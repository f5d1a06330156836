//! Repositories for database operations
//!
//! Handlers talk to the persistence layer only through these traits. The
//! PostgreSQL adapters live in the submodules; foreign-key existence is the
//! only rule enforced at this level.

use async_trait::async_trait;
use common::error::DatabaseResult;
use uuid::Uuid;

use crate::models::{GenreFilter, NewShow, NewUser, Show, User};

pub mod show;
pub mod user;

pub use show::PgShowRepository;
pub use user::PgUserRepository;

/// Persistence operations on shows
#[async_trait]
pub trait ShowRepository: Send + Sync {
    /// Every show, oldest first
    async fn find_all(&self) -> DatabaseResult<Vec<Show>>;

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<Show>>;

    async fn find_by_genre(&self, filter: &GenreFilter) -> DatabaseResult<Vec<Show>>;

    async fn create(&self, new_show: &NewShow) -> DatabaseResult<Show>;

    /// Persist every field of an existing record
    async fn save(&self, show: &Show) -> DatabaseResult<Show>;

    async fn delete(&self, id: Uuid) -> DatabaseResult<()>;

    /// Users that have the show on their watch list
    async fn users_of(&self, show_id: Uuid) -> DatabaseResult<Vec<User>>;
}

/// Persistence operations on users and their watch lists
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Every user, oldest first
    async fn find_all(&self) -> DatabaseResult<Vec<User>>;

    async fn find_by_id(&self, id: Uuid) -> DatabaseResult<Option<User>>;

    async fn create(&self, new_user: &NewUser) -> DatabaseResult<User>;

    /// Persist every field of an existing record
    async fn save(&self, user: &User) -> DatabaseResult<User>;

    async fn delete(&self, id: Uuid) -> DatabaseResult<()>;

    /// Shows on the user's watch list
    async fn shows_of(&self, user_id: Uuid) -> DatabaseResult<Vec<Show>>;

    /// Link a show to a user. Linking an existing pair again is a no-op.
    async fn add_show(&self, user_id: Uuid, show_id: Uuid) -> DatabaseResult<()>;
}
