pub mod db;
pub mod error;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::db::Database;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Database>,
}

pub async fn run() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Connect to database
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    tracing::info!("Connecting to database...");
    let db = Database::connect(&database_url).await?;

    tracing::info!("Running migrations...");
    db.run_migrations().await?;

    let state = AppState { db: Arc::new(db) };

    let app = router(state);

    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port = std::env::var("PORT").unwrap_or_else(|_| "3000".to_string());
    let addr = format!("{}:{}", host, port);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Build the full application router.
pub fn router(state: AppState) -> Router {
    let protected_routes = Router::new()
        // Account routes
        .route("/api/auth/me", get(routes::account::me))
        // Deck routes
        .route("/api/decks", get(routes::decks::list))
        .route("/api/decks", post(routes::decks::create))
        .route("/api/decks/:id", delete(routes::decks::remove))
        .route("/api/decks/:id/progress", get(routes::decks::progress))
        .route("/api/decks/:id/export", get(routes::decks::export))
        .route("/api/decks/import", post(routes::decks::import))
        // Card routes
        .route("/api/decks/:id/cards", post(routes::cards::create))
        .route("/api/decks/:id/cards", get(routes::cards::list))
        .route("/api/cards/:id", delete(routes::cards::remove))
        // Study routes
        .route("/api/decks/:id/due", get(routes::study::due))
        .route(
            "/api/study/review/leitner",
            post(routes::study::review_leitner),
        )
        .route("/api/study/review/sm2", post(routes::study::review_sm2))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            routes::auth::auth_middleware,
        ));

    Router::new()
        .route("/health", get(health_check))
        .route("/api/auth/register", post(routes::account::register))
        .merge(protected_routes)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
