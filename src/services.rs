//! Post Service
//!
//! CRUD on blog posts with ownership enforcement. Reads are public;
//! mutations require the caller to own the post.

use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{
    CreatePostRequest, NewPost, PaginatedResponse, PaginationMeta, Post, PostQuery, PostResponse,
    PostUpdate, UpdatePostRequest,
};
use crate::store::{PostStore, UserStore};

/// Author name substituted when the owning user record is gone. A dangling
/// owner is a store inconsistency, not a reason to fail the read.
const UNKNOWN_AUTHOR: &str = "Unknown";

pub struct PostService {
    posts: Arc<dyn PostStore>,
    users: Arc<dyn UserStore>,
    posts_per_page: i64,
}

impl PostService {
    pub fn new(posts: Arc<dyn PostStore>, users: Arc<dyn UserStore>, posts_per_page: i64) -> Self {
        Self {
            posts,
            users,
            posts_per_page,
        }
    }

    /// List posts newest-first with pagination metadata
    pub async fn list(
        &self,
        query: &PostQuery,
    ) -> Result<PaginatedResponse<PostResponse>, ApiError> {
        let per_page = query.per_page(self.posts_per_page);
        let posts = self
            .posts
            .list_posts(per_page, query.offset(self.posts_per_page))
            .await?;
        let total = self.posts.count_posts().await?;

        let mut data = Vec::with_capacity(posts.len());
        for post in posts {
            data.push(self.with_author(post).await?);
        }

        Ok(PaginatedResponse {
            data,
            pagination: PaginationMeta::new(total, query.page(), per_page),
        })
    }

    /// Fetch one post with its author's username resolved
    pub async fn get(&self, id: i64) -> Result<PostResponse, ApiError> {
        let post = self
            .posts
            .post_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("Post"))?;
        self.with_author(post).await
    }

    /// Create a post owned by `user_id`
    pub async fn create(
        &self,
        user_id: i64,
        req: CreatePostRequest,
    ) -> Result<PostResponse, ApiError> {
        let post = self
            .posts
            .insert_post(NewPost {
                user_id,
                title: req.title,
                content: req.content,
                image_url: req.image_url,
            })
            .await?;

        tracing::info!(post_id = post.id, user_id, "post created");

        self.with_author(post).await
    }

    /// Apply a partial update to a post the caller owns.
    ///
    /// Not-found is checked before ownership so callers cannot probe which
    /// posts exist through the 403.
    pub async fn update(
        &self,
        id: i64,
        user_id: i64,
        req: UpdatePostRequest,
    ) -> Result<PostResponse, ApiError> {
        self.authorize_owner(id, user_id).await?;

        let updated = self
            .posts
            .update_post(
                id,
                PostUpdate {
                    title: req.title,
                    content: req.content,
                    image_url: req.image_url,
                },
            )
            .await?
            // Deleted between the ownership check and the write.
            .ok_or(ApiError::NotFound("Post"))?;

        self.with_author(updated).await
    }

    /// Delete a post the caller owns
    pub async fn delete(&self, id: i64, user_id: i64) -> Result<(), ApiError> {
        self.authorize_owner(id, user_id).await?;

        if !self.posts.delete_post(id).await? {
            return Err(ApiError::NotFound("Post"));
        }

        tracing::info!(post_id = id, user_id, "post deleted");
        Ok(())
    }

    /// Ownership is the sole authorization rule: no roles, no admin override.
    async fn authorize_owner(&self, id: i64, user_id: i64) -> Result<Post, ApiError> {
        let post = self
            .posts
            .post_by_id(id)
            .await?
            .ok_or(ApiError::NotFound("Post"))?;

        if post.user_id != user_id {
            return Err(ApiError::Forbidden);
        }
        Ok(post)
    }

    async fn with_author(&self, post: Post) -> Result<PostResponse, ApiError> {
        let author = self
            .users
            .user_by_id(post.user_id)
            .await?
            .map(|u| u.username)
            .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string());
        Ok(PostResponse::new(post, author))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::AppConfig;
    use crate::models::NewUser;
    use crate::store::MemoryStore;

    async fn setup() -> (PostService, i64, i64) {
        let store = Arc::new(MemoryStore::new());
        let alice = store
            .insert_user(NewUser {
                username: "alice".to_string(),
                email: "a@x.com".to_string(),
                password_hash: "$argon2id$placeholder".to_string(),
            })
            .await
            .unwrap();
        let bob = store
            .insert_user(NewUser {
                username: "bob".to_string(),
                email: "b@x.com".to_string(),
                password_hash: "$argon2id$placeholder".to_string(),
            })
            .await
            .unwrap();

        let config = AppConfig::for_tests();
        let service = PostService::new(store.clone(), store, config.posts_per_page);
        (service, alice.id, bob.id)
    }

    fn create_req(title: &str) -> CreatePostRequest {
        CreatePostRequest {
            title: title.to_string(),
            content: "C".to_string(),
            image_url: None,
        }
    }

    #[tokio::test]
    async fn created_post_resolves_author_name() {
        let (service, alice, _) = setup().await;
        let post = service.create(alice, create_req("T")).await.unwrap();

        assert_eq!(post.id, 1);
        let fetched = service.get(post.id).await.unwrap();
        assert_eq!(fetched.author, "alice");
        assert_eq!(fetched.title, "T");
    }

    #[tokio::test]
    async fn missing_post_is_not_found() {
        let (service, _, _) = setup().await;
        assert!(matches!(
            service.get(42).await.unwrap_err(),
            ApiError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn non_owner_mutations_are_forbidden() {
        let (service, alice, bob) = setup().await;
        let post = service.create(alice, create_req("T")).await.unwrap();

        let err = service
            .update(post.id, bob, UpdatePostRequest::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));

        let err = service.delete(post.id, bob).await.unwrap_err();
        assert!(matches!(err, ApiError::Forbidden));

        // Still there for its owner.
        assert!(service.get(post.id).await.is_ok());
    }

    #[tokio::test]
    async fn not_found_takes_precedence_over_forbidden() {
        let (service, _, bob) = setup().await;
        let err = service.delete(42, bob).await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn partial_update_touches_only_present_fields() {
        let (service, alice, _) = setup().await;
        let post = service.create(alice, create_req("T")).await.unwrap();

        let updated = service
            .update(
                post.id,
                alice,
                UpdatePostRequest {
                    title: Some("T2".to_string()),
                    ..UpdatePostRequest::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.title, "T2");
        assert_eq!(updated.content, "C");
        assert!(updated.updated_at >= post.updated_at);
    }

    #[tokio::test]
    async fn delete_then_get_is_not_found() {
        let (service, alice, _) = setup().await;
        let post = service.create(alice, create_req("T")).await.unwrap();

        service.delete(post.id, alice).await.unwrap();
        assert!(matches!(
            service.get(post.id).await.unwrap_err(),
            ApiError::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn listing_is_newest_first_with_pagination_echo() {
        let (service, alice, _) = setup().await;
        for title in ["t1", "t2", "t3"] {
            service.create(alice, create_req(title)).await.unwrap();
        }

        let page = service
            .list(&PostQuery {
                page: Some(1),
                per_page: Some(2),
            })
            .await
            .unwrap();

        let titles: Vec<&str> = page.data.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["t3", "t2"]);
        assert_eq!(page.pagination.total, 3);
        assert_eq!(page.pagination.page, 1);
        assert_eq!(page.pagination.per_page, 2);
        assert_eq!(page.pagination.total_pages, 2);
    }
}
