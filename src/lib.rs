//! QuillPress Blog API
//!
//! A blog backend: user accounts with JWT authentication and CRUD on posts
//! scoped to their authoring user.

pub mod auth;
pub mod config;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod services;
pub mod store;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use auth::{AuthService, TokenService};
use config::AppConfig;
use services::PostService;
use store::{PostStore, UserStore};

/// Shared application state. Every request dependency is injected here at
/// startup; there are no ambient singletons.
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub posts: Arc<PostService>,
    pub tokens: Arc<TokenService>,
}

impl AppState {
    pub fn new(
        users: Arc<dyn UserStore>,
        posts: Arc<dyn PostStore>,
        config: &AppConfig,
    ) -> Self {
        let tokens = Arc::new(TokenService::new(config));
        let auth = Arc::new(AuthService::new(users.clone(), tokens.clone(), config));
        let posts = Arc::new(PostService::new(posts, users, config.posts_per_page));

        Self {
            auth,
            posts,
            tokens,
        }
    }
}

/// Build the application router
pub fn router(state: AppState) -> Router {
    let api = Router::new()
        .route("/auth/register", post(auth::handlers::register))
        .route("/auth/login", post(auth::handlers::login))
        .route("/auth/me", get(auth::handlers::get_current_user))
        .route(
            "/posts",
            get(handlers::posts::list_posts).post(handlers::posts::create_post),
        )
        .route(
            "/posts/:id",
            get(handlers::posts::get_post)
                .put(handlers::posts::update_post)
                .delete(handlers::posts::delete_post),
        )
        .route("/health", get(handlers::health));

    Router::new()
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
