//! Data Models
//!
//! Entities, request DTOs, and response DTOs for users and posts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

// ============================================
// Database Entities
// ============================================

/// User entity from the store
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct User {
    pub id: i64,
    pub username: String,
    pub email: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Blog post entity from the store
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Insert payload for a new user (password already hashed)
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
}

/// Insert payload for a new post
#[derive(Debug, Clone)]
pub struct NewPost {
    pub user_id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
}

/// Partial update for a post. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct PostUpdate {
    pub title: Option<String>,
    pub content: Option<String>,
    pub image_url: Option<String>,
}

// ============================================
// Request DTOs
// ============================================

/// Registration request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 80, message = "Username must be 1-80 characters"))]
    pub username: String,

    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Create post request
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: String,

    #[validate(length(min = 1, message = "Content is required"))]
    pub content: String,

    pub image_url: Option<String>,
}

/// Update post request (partial)
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdatePostRequest {
    #[validate(length(min = 1, max = 200, message = "Title must be 1-200 characters"))]
    pub title: Option<String>,

    #[validate(length(min = 1, message = "Content must not be empty"))]
    pub content: Option<String>,

    pub image_url: Option<String>,
}

/// Post listing query parameters
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl PostQuery {
    pub fn page(&self) -> i64 {
        self.page.unwrap_or(1).max(1)
    }

    pub fn per_page(&self, default: i64) -> i64 {
        self.per_page.unwrap_or(default).clamp(1, 100)
    }

    pub fn offset(&self, default_per_page: i64) -> i64 {
        // page is client-supplied and unbounded; saturate rather than
        // overflow on absurd values.
        (self.page() - 1).saturating_mul(self.per_page(default_per_page))
    }
}

// ============================================
// Response DTOs
// ============================================

/// Public user view (no password hash)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
            created_at: user.created_at,
        }
    }
}

/// Authentication response with token
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub user: UserResponse,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// Registration response: the auth payload plus a confirmation message
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    #[serde(flatten)]
    pub auth: AuthResponse,
}

/// Post with the author's username resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostResponse {
    pub id: i64,
    pub title: String,
    pub content: String,
    pub image_url: Option<String>,
    pub author: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PostResponse {
    pub fn new(post: Post, author: String) -> Self {
        Self {
            id: post.id,
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            author,
            created_at: post.created_at,
            updated_at: post.updated_at,
        }
    }
}

/// Simple message response
#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Paginated response wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub data: Vec<T>,
    pub pagination: PaginationMeta,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginationMeta {
    pub total: i64,
    pub page: i64,
    pub per_page: i64,
    pub total_pages: i64,
}

impl PaginationMeta {
    pub fn new(total: i64, page: i64, per_page: i64) -> Self {
        let total_pages = (total + per_page - 1) / per_page;
        Self {
            total,
            page,
            per_page,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_defaults_and_clamping() {
        let q = PostQuery::default();
        assert_eq!(q.page(), 1);
        assert_eq!(q.per_page(10), 10);
        assert_eq!(q.offset(10), 0);

        let q = PostQuery {
            page: Some(0),
            per_page: Some(500),
        };
        assert_eq!(q.page(), 1);
        assert_eq!(q.per_page(10), 100);
    }

    #[test]
    fn offset_saturates_on_huge_page() {
        let q = PostQuery {
            page: Some(i64::MAX),
            per_page: Some(100),
        };
        assert_eq!(q.offset(10), i64::MAX);

        let q = PostQuery {
            page: Some(i64::MAX),
            per_page: Some(1),
        };
        assert_eq!(q.offset(10), i64::MAX - 1);
    }

    #[test]
    fn pagination_meta_total_pages() {
        let meta = PaginationMeta::new(21, 1, 10);
        assert_eq!(meta.total_pages, 3);
        let meta = PaginationMeta::new(0, 1, 10);
        assert_eq!(meta.total_pages, 0);
    }
}
