use std::sync::Arc;

use quillpress::config::AppConfig;
use quillpress::store::{MemoryStore, PgStore, PostStore, UserStore};
use quillpress::{router, AppState};

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "quillpress=info,tower_http=info".into()),
        )
        .init();

    let config = AppConfig::from_env();
    if let Err(e) = config.validate() {
        tracing::error!("invalid configuration: {e}");
        std::process::exit(1);
    }

    let (users, posts): (Arc<dyn UserStore>, Arc<dyn PostStore>) =
        match std::env::var("DATABASE_URL") {
            Ok(url) => {
                let pool = sqlx::PgPool::connect(&url)
                    .await
                    .expect("failed to connect to database");
                let store = Arc::new(PgStore::new(pool));
                store
                    .run_migrations()
                    .await
                    .expect("failed to run migrations");
                (store.clone(), store)
            }
            Err(_) => {
                tracing::warn!("DATABASE_URL not set; using in-memory store (data is not persisted)");
                let store = Arc::new(MemoryStore::new());
                (store.clone(), store)
            }
        };

    let state = AppState::new(users, posts, &config);
    let app = router(state);

    let bind_addr = std::env::var("BIND_ADDR").unwrap_or_else(|_| "0.0.0.0:8080".to_string());
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .unwrap_or_else(|e| panic!("failed to bind {bind_addr}: {e}"));

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
