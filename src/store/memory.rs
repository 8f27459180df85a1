//! In-Memory Store
//!
//! Backs the black-box tests and database-less development runs. Ids are
//! assigned sequentially starting at 1, matching the Postgres BIGSERIAL
//! behavior.

use std::collections::BTreeMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use crate::models::{NewPost, NewUser, Post, PostUpdate, User};

use super::{PostStore, StoreError, UserStore};

#[derive(Debug, Default)]
struct Inner {
    users: BTreeMap<i64, User>,
    posts: BTreeMap<i64, Post>,
    next_user_id: i64,
    next_post_id: i64,
}

/// Process-local store guarded by a single mutex. Never held across await
/// points, so plain `std::sync::Mutex` is sufficient.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn insert_user(&self, user: NewUser) -> Result<User, StoreError> {
        let mut inner = self.inner.lock().unwrap();

        if inner.users.values().any(|u| u.email == user.email) {
            return Err(StoreError::ConstraintViolation {
                field: Some("email"),
            });
        }
        if inner.users.values().any(|u| u.username == user.username) {
            return Err(StoreError::ConstraintViolation {
                field: Some("username"),
            });
        }

        inner.next_user_id += 1;
        let id = inner.next_user_id;
        let record = User {
            id,
            username: user.username,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        inner.users.insert(id, record.clone());
        Ok(record)
    }

    async fn user_by_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        Ok(self.inner.lock().unwrap().users.get(&id).cloned())
    }

    async fn user_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner.users.values().find(|u| u.email == email).cloned())
    }

    async fn user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.lock().unwrap();
        Ok(inner
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }
}

#[async_trait]
impl PostStore for MemoryStore {
    async fn insert_post(&self, post: NewPost) -> Result<Post, StoreError> {
        let mut inner = self.inner.lock().unwrap();

        // The owning user must exist at creation time.
        if !inner.users.contains_key(&post.user_id) {
            return Err(StoreError::ConstraintViolation {
                field: Some("user_id"),
            });
        }

        inner.next_post_id += 1;
        let id = inner.next_post_id;
        let now = Utc::now();
        let record = Post {
            id,
            user_id: post.user_id,
            title: post.title,
            content: post.content,
            image_url: post.image_url,
            created_at: now,
            updated_at: now,
        };
        inner.posts.insert(id, record.clone());
        Ok(record)
    }

    async fn post_by_id(&self, id: i64) -> Result<Option<Post>, StoreError> {
        Ok(self.inner.lock().unwrap().posts.get(&id).cloned())
    }

    async fn list_posts(&self, limit: i64, offset: i64) -> Result<Vec<Post>, StoreError> {
        let inner = self.inner.lock().unwrap();
        let mut posts: Vec<Post> = inner.posts.values().cloned().collect();
        // Newest first; later ids break ties from same-instant timestamps.
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(posts
            .into_iter()
            .skip(offset.max(0) as usize)
            .take(limit.max(0) as usize)
            .collect())
    }

    async fn count_posts(&self) -> Result<i64, StoreError> {
        Ok(self.inner.lock().unwrap().posts.len() as i64)
    }

    async fn update_post(&self, id: i64, update: PostUpdate) -> Result<Option<Post>, StoreError> {
        let mut inner = self.inner.lock().unwrap();
        let Some(post) = inner.posts.get_mut(&id) else {
            return Ok(None);
        };

        if let Some(title) = update.title {
            post.title = title;
        }
        if let Some(content) = update.content {
            post.content = content;
        }
        if let Some(image_url) = update.image_url {
            post.image_url = Some(image_url);
        }
        post.updated_at = Utc::now();

        Ok(Some(post.clone()))
    }

    async fn delete_post(&self, id: i64) -> Result<bool, StoreError> {
        Ok(self.inner.lock().unwrap().posts.remove(&id).is_some())
    }
}
