//! Postgres Store
//!
//! sqlx-backed implementation of the store traits. Schema migrations run at
//! startup; uniqueness is enforced by the database so that check-then-insert
//! races surface as attributable constraint violations.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::models::{NewPost, NewUser, Post, PostUpdate, User};

use super::{PostStore, StoreError, UserStore};

pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create tables and indexes if they do not exist yet
    pub async fn run_migrations(&self) -> Result<(), StoreError> {
        tracing::info!("Running database migrations");

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id BIGSERIAL PRIMARY KEY,
                username VARCHAR(80) NOT NULL,
                email VARCHAR(255) NOT NULL,
                password_hash VARCHAR(255) NOT NULL,
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                CONSTRAINT users_username_key UNIQUE (username),
                CONSTRAINT users_email_key UNIQUE (email)
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(backend_err)?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS posts (
                id BIGSERIAL PRIMARY KEY,
                user_id BIGINT NOT NULL REFERENCES users(id),
                title VARCHAR(200) NOT NULL,
                content TEXT NOT NULL,
                image_url VARCHAR(500),
                created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
                updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
            );
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(backend_err)?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_posts_created ON posts(created_at DESC);")
            .execute(&self.pool)
            .await
            .map_err(backend_err)?;

        tracing::info!("Migrations completed");
        Ok(())
    }
}

/// Translate a sqlx error, attributing unique violations to a column via the
/// constraint name instead of matching error text.
fn map_sqlx_err(err: sqlx::Error) -> StoreError {
    if let Some(db_err) = err.as_database_error() {
        if db_err.is_unique_violation() {
            let field = match db_err.constraint() {
                Some("users_email_key") => Some("email"),
                Some("users_username_key") => Some("username"),
                _ => None,
            };
            return StoreError::ConstraintViolation { field };
        }
        if db_err.is_foreign_key_violation() {
            return StoreError::ConstraintViolation {
                field: Some("user_id"),
            };
        }
    }
    backend_err(err)
}

fn backend_err(err: sqlx::Error) -> StoreError {
    StoreError::Backend(err.to_string())
}

#[async_trait]
impl UserStore for PgStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING *
            "#,
        )
        .bind(&user.username)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)
    }

    async fn user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        sqlx::query_as("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend_err)
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend_err)
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        sqlx::query_as("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend_err)
    }
}

#[async_trait]
impl PostStore for PgStore {
    async fn insert_post(&self, post: NewPost) -> Result<Post, StoreError> {
        sqlx::query_as::<_, Post>(
            r#"
            INSERT INTO posts (user_id, title, content, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(post.user_id)
        .bind(&post.title)
        .bind(&post.content)
        .bind(&post.image_url)
        .fetch_one(&self.pool)
        .await
        .map_err(map_sqlx_err)
    }

    async fn post_by_id(&self, id: i64) -> Result<Option<Post>, StoreError> {
        sqlx::query_as("SELECT * FROM posts WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(backend_err)
    }

    async fn list_posts(&self, limit: i64, offset: i64) -> Result<Vec<Post>, StoreError> {
        sqlx::query_as(
            "SELECT * FROM posts ORDER BY created_at DESC, id DESC LIMIT $1 OFFSET $2",
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(&self.pool)
        .await
        .map_err(backend_err)
    }

    async fn count_posts(&self) -> Result<i64, StoreError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM posts")
            .fetch_one(&self.pool)
            .await
            .map_err(backend_err)
    }

    async fn update_post(&self, id: i64, update: PostUpdate) -> Result<Option<Post>, StoreError> {
        sqlx::query_as::<_, Post>(
            r#"
            UPDATE posts SET
                title = COALESCE($2, title),
                content = COALESCE($3, content),
                image_url = COALESCE($4, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(&update.title)
        .bind(&update.content)
        .bind(&update.image_url)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend_err)
    }

    async fn delete_post(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM posts WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(backend_err)?;
        Ok(result.rows_affected() > 0)
    }
}
