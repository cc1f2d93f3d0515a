//! PostgreSQL database operations

use sqlx::{postgres::PgPoolOptions, PgPool};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;

/// Database wrapper with connection pool
#[derive(Clone)]
pub struct Database {
    pool: PgPool,
}

/// Map a unique-constraint violation to a conflict error.
fn conflict_on_unique(message: &str) -> impl FnOnce(sqlx::Error) -> ApiError + '_ {
    move |err| match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            ApiError::Conflict(message.to_string())
        }
        _ => ApiError::Database(err),
    }
}

impl Database {
    /// Connect to PostgreSQL and create connection pool
    pub async fn connect(database_url: &str) -> Result<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(10)
            .connect(database_url)
            .await?;

        Ok(Self { pool })
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        sqlx::migrate!("./migrations")
            .run(&self.pool)
            .await
            .map_err(|e| ApiError::Migration(e.to_string()))?;
        Ok(())
    }

    /// Get the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === User Repository ===

    /// Create a new user with generated token
    pub async fn create_user(&self, username: &str) -> Result<DbUser> {
        let token = Uuid::new_v4().to_string();
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            INSERT INTO users (username, token)
            VALUES ($1, $2)
            RETURNING id, username, token, created_at, last_seen_at
            "#,
        )
        .bind(username)
        .bind(&token)
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_on_unique("username already taken"))?;

        Ok(user)
    }

    /// Get user by token
    pub async fn get_user_by_token(&self, token: &str) -> Result<Option<DbUser>> {
        let user = sqlx::query_as::<_, DbUser>(
            r#"
            SELECT id, username, token, created_at, last_seen_at
            FROM users
            WHERE token = $1
            "#,
        )
        .bind(token)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Update user last_seen_at timestamp
    pub async fn update_last_seen(&self, user_id: Uuid) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE users
            SET last_seen_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Deck Repository ===

    /// Create a deck for a user
    pub async fn create_deck(
        &self,
        user_id: Uuid,
        name: &str,
        algorithm: Algorithm,
    ) -> Result<DbDeck> {
        let deck = sqlx::query_as::<_, DbDeck>(
            r#"
            INSERT INTO decks (user_id, name, algorithm)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, name, algorithm, created_at
            "#,
        )
        .bind(user_id)
        .bind(name)
        .bind(algorithm.as_str())
        .fetch_one(&self.pool)
        .await
        .map_err(conflict_on_unique("deck name already used"))?;

        Ok(deck)
    }

    /// Get a deck owned by a user
    pub async fn get_deck(&self, deck_id: i64, user_id: Uuid) -> Result<Option<DbDeck>> {
        let deck = sqlx::query_as::<_, DbDeck>(
            r#"
            SELECT id, user_id, name, algorithm, created_at
            FROM decks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(deck_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(deck)
    }

    /// Get all decks for a user, with card and due counts
    pub async fn get_all_decks(&self, user_id: Uuid) -> Result<Vec<DeckInfo>> {
        let decks = sqlx::query_as::<_, DeckInfo>(
            r#"
            SELECT
                d.id,
                d.name,
                d.algorithm,
                COUNT(c.id)::INT as card_count,
                COUNT(CASE WHEN c.next_review <= CURRENT_DATE THEN 1 END)::INT as due_count
            FROM decks d
            LEFT JOIN cards c ON c.deck_id = d.id
            WHERE d.user_id = $1
            GROUP BY d.id
            ORDER BY d.name
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(decks)
    }

    /// Delete a deck owned by a user
    pub async fn delete_deck(&self, deck_id: i64, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM decks
            WHERE id = $1 AND user_id = $2
            "#,
        )
        .bind(deck_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    // === Card Repository ===

    /// Insert a card with its initial schedule
    pub async fn create_card(
        &self,
        deck_id: i64,
        question: &str,
        answer: &str,
        schedule: &CardSchedule,
    ) -> Result<DbCard> {
        let columns = ScheduleColumns::from_schedule(schedule);
        let card = sqlx::query_as::<_, DbCard>(
            r#"
            INSERT INTO cards (deck_id, question, answer, algorithm, box_number,
                              interval_days, ease_factor, repetitions, last_reviewed, next_review)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING id, deck_id, question, answer, algorithm, box_number,
                      interval_days, ease_factor, repetitions, last_reviewed, next_review,
                      created_at, updated_at
            "#,
        )
        .bind(deck_id)
        .bind(question)
        .bind(answer)
        .bind(columns.algorithm)
        .bind(columns.box_number)
        .bind(columns.interval_days)
        .bind(columns.ease_factor)
        .bind(columns.repetitions)
        .bind(columns.last_reviewed)
        .bind(columns.next_review)
        .fetch_one(&self.pool)
        .await?;

        Ok(card)
    }

    /// Get a card owned by a user (via its deck)
    pub async fn get_card(&self, card_id: i64, user_id: Uuid) -> Result<Option<DbCard>> {
        let card = sqlx::query_as::<_, DbCard>(
            r#"
            SELECT c.id, c.deck_id, c.question, c.answer, c.algorithm, c.box_number,
                   c.interval_days, c.ease_factor, c.repetitions, c.last_reviewed, c.next_review,
                   c.created_at, c.updated_at
            FROM cards c
            JOIN decks d ON d.id = c.deck_id
            WHERE c.id = $1 AND d.user_id = $2
            "#,
        )
        .bind(card_id)
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(card)
    }

    /// Get all cards in a deck
    pub async fn get_cards_by_deck(&self, deck_id: i64) -> Result<Vec<DbCard>> {
        let cards = sqlx::query_as::<_, DbCard>(
            r#"
            SELECT id, deck_id, question, answer, algorithm, box_number,
                   interval_days, ease_factor, repetitions, last_reviewed, next_review,
                   created_at, updated_at
            FROM cards
            WHERE deck_id = $1
            ORDER BY id
            "#,
        )
        .bind(deck_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(cards)
    }

    /// Delete a card owned by a user
    pub async fn delete_card(&self, card_id: i64, user_id: Uuid) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM cards
            WHERE id = $1
              AND deck_id IN (SELECT id FROM decks WHERE user_id = $2)
            "#,
        )
        .bind(card_id)
        .bind(user_id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Write back a card's schedule after a review
    pub async fn update_card_schedule(&self, card_id: i64, schedule: &CardSchedule) -> Result<()> {
        let columns = ScheduleColumns::from_schedule(schedule);
        sqlx::query(
            r#"
            UPDATE cards
            SET algorithm = $2,
                box_number = $3,
                interval_days = $4,
                ease_factor = $5,
                repetitions = $6,
                last_reviewed = $7,
                next_review = $8,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(card_id)
        .bind(columns.algorithm)
        .bind(columns.box_number)
        .bind(columns.interval_days)
        .bind(columns.ease_factor)
        .bind(columns.repetitions)
        .bind(columns.last_reviewed)
        .bind(columns.next_review)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    // === Review Ledger ===

    /// Append a review record. The ledger is insert-only.
    pub async fn insert_review(&self, review: &DbReview) -> Result<()> {
        sqlx::query(
            r#"
            INSERT INTO reviews (id, card_id, user_id, quality, was_correct, reviewed_on)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(review.id)
        .bind(review.card_id)
        .bind(review.user_id)
        .bind(review.quality)
        .bind(review.was_correct)
        .bind(review.reviewed_on)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Get all of a user's reviews for cards in a deck
    pub async fn get_reviews_for_deck(&self, user_id: Uuid, deck_id: i64) -> Result<Vec<DbReview>> {
        let reviews = sqlx::query_as::<_, DbReview>(
            r#"
            SELECT r.id, r.card_id, r.user_id, r.quality, r.was_correct, r.reviewed_on, r.created_at
            FROM reviews r
            JOIN cards c ON c.id = r.card_id
            WHERE r.user_id = $1 AND c.deck_id = $2
            ORDER BY r.reviewed_on
            "#,
        )
        .bind(user_id)
        .bind(deck_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(reviews)
    }
}
