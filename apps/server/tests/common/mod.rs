//! Common test utilities and fixtures for integration tests.
//!
//! # Requirements
//! Integration tests require a PostgreSQL database (set DATABASE_URL).

pub mod fixtures;

use std::sync::Arc;

use axum::Router;
use uuid::Uuid;

use cardbox_server::db::Database;
use cardbox_server::{router, AppState};

/// Test context containing database connection and test server.
///
/// Requires DATABASE_URL environment variable to be set.
pub struct TestContext {
    pub db: Arc<Database>,
    app: Router,
}

impl TestContext {
    /// Create a new test context.
    ///
    /// # Panics
    /// Panics if DATABASE_URL is not set or database connection fails.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url =
            std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests");

        let db = Database::connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        db.run_migrations().await.expect("Failed to run migrations");

        let db = Arc::new(db);
        let app = router(AppState { db: db.clone() });

        Self { db, app }
    }

    /// Get the router for use with axum-test.
    pub fn router(&self) -> Router {
        self.app.clone()
    }

    /// Create a test user with a unique username, returning id and token.
    pub async fn create_test_user(&self, name: &str) -> (Uuid, String) {
        let username = format!("{}-{}", name, Uuid::new_v4());
        let user = self
            .db
            .create_user(&username)
            .await
            .expect("Failed to create test user");
        (user.id, user.token)
    }

    /// Format authorization header value.
    pub fn auth_header_value(token: &str) -> String {
        format!("Bearer {}", token)
    }

    /// Clean up test data for a user.
    ///
    /// Call this after tests to remove test data. Decks, cards, and
    /// reviews cascade from the user row.
    pub async fn cleanup_user(&self, user_id: Uuid) {
        let _ = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(user_id)
            .execute(self.db.pool())
            .await;
    }
}
