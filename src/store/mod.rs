//! Storage Seam
//!
//! The rest of the crate talks to persistence through these traits. Two
//! implementations exist: [`PgStore`] backed by Postgres and [`MemoryStore`]
//! for tests and database-less development.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use async_trait::async_trait;

use crate::models::{NewPost, NewUser, Post, PostUpdate, User};

/// Storage errors. Unique-constraint violations carry the offending column
/// name when the backend reports enough detail to attribute it, so callers
/// can map the conflict to a field without string-matching error text.
#[derive(Debug, Clone, thiserror::Error)]
pub enum StoreError {
    #[error("unique constraint violation")]
    ConstraintViolation { field: Option<&'static str> },

    #[error("database error: {0}")]
    Backend(String),
}

/// User persistence operations
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Insert a new user, assigning its id. Fails with
    /// [`StoreError::ConstraintViolation`] when username or email collide.
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError>;

    async fn user_by_id(&self, id: i64) -> Result<Option<User>, StoreError>;

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;
}

/// Post persistence operations
#[async_trait]
pub trait PostStore: Send + Sync {
    /// Insert a new post, assigning its id and timestamps.
    async fn insert_post(&self, post: NewPost) -> Result<Post, StoreError>;

    async fn post_by_id(&self, id: i64) -> Result<Option<Post>, StoreError>;

    /// List posts ordered by creation time, newest first.
    async fn list_posts(&self, limit: i64, offset: i64) -> Result<Vec<Post>, StoreError>;

    async fn count_posts(&self) -> Result<i64, StoreError>;

    /// Apply the present fields of `update` and refresh `updated_at`.
    /// Returns `None` when the post does not exist.
    async fn update_post(&self, id: i64, update: PostUpdate) -> Result<Option<Post>, StoreError>;

    /// Remove a post permanently. Returns whether a row was deleted.
    async fn delete_post(&self, id: i64) -> Result<bool, StoreError>;
}
