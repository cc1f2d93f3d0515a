//! Database models and API types

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

// Re-export shared types from srs-core
pub use srs_core::{
    Algorithm, CardSchedule, ProgressReport, Quality, ReviewRecord, ScheduleState,
};

// === Database Entity Types ===

/// Registered user account
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbUser {
    pub id: Uuid,
    pub username: String,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

/// Deck stored in PostgreSQL
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbDeck {
    pub id: i64,
    pub user_id: Uuid,
    pub name: String,
    pub algorithm: String,
    pub created_at: DateTime<Utc>,
}

impl DbDeck {
    pub fn algorithm(&self) -> Algorithm {
        Algorithm::from_str(&self.algorithm).unwrap_or_default()
    }
}

/// Card stored in PostgreSQL.
///
/// Scheduling columns are per-algorithm: `box_number` is populated for
/// Leitner cards, the SM-2 triple for SM-2 cards.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCard {
    pub id: i64,
    pub deck_id: i64,
    pub question: String,
    pub answer: String,
    pub algorithm: String,
    pub box_number: Option<i32>,
    pub interval_days: Option<i32>,
    pub ease_factor: Option<f64>,
    pub repetitions: Option<i32>,
    pub last_reviewed: Option<NaiveDate>,
    pub next_review: NaiveDate,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl DbCard {
    /// Reconstruct the core scheduling state from the row.
    pub fn schedule(&self) -> CardSchedule {
        let state = match Algorithm::from_str(&self.algorithm).unwrap_or_default() {
            Algorithm::Leitner => ScheduleState::Leitner {
                box_number: self.box_number.unwrap_or(1) as u8,
            },
            Algorithm::Sm2 => ScheduleState::Sm2 {
                interval_days: self.interval_days.unwrap_or(1) as u32,
                ease_factor: self.ease_factor.unwrap_or(2.5),
                repetitions: self.repetitions.unwrap_or(0) as u32,
            },
        };

        CardSchedule {
            state,
            last_reviewed: self.last_reviewed,
            next_review: self.next_review,
        }
    }

    /// Convert to API card type
    pub fn to_api_card(&self) -> CardResponse {
        CardResponse {
            id: self.id,
            deck_id: self.deck_id,
            question: self.question.clone(),
            answer: self.answer.clone(),
            schedule: self.schedule(),
        }
    }
}

/// Card scheduling state flattened into column values for writing.
#[derive(Debug, Clone)]
pub struct ScheduleColumns {
    pub algorithm: &'static str,
    pub box_number: Option<i32>,
    pub interval_days: Option<i32>,
    pub ease_factor: Option<f64>,
    pub repetitions: Option<i32>,
    pub last_reviewed: Option<NaiveDate>,
    pub next_review: NaiveDate,
}

impl ScheduleColumns {
    /// Create from a core CardSchedule
    pub fn from_schedule(schedule: &CardSchedule) -> Self {
        let (box_number, interval_days, ease_factor, repetitions) = match schedule.state {
            ScheduleState::Leitner { box_number } => (Some(i32::from(box_number)), None, None, None),
            ScheduleState::Sm2 {
                interval_days,
                ease_factor,
                repetitions,
            } => (
                None,
                Some(interval_days as i32),
                Some(ease_factor),
                Some(repetitions as i32),
            ),
        };

        Self {
            algorithm: schedule.algorithm().as_str(),
            box_number,
            interval_days,
            ease_factor,
            repetitions,
            last_reviewed: schedule.last_reviewed,
            next_review: schedule.next_review,
        }
    }
}

/// Review ledger row. Insert-only.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReview {
    pub id: Uuid,
    pub card_id: i64,
    pub user_id: Uuid,
    pub quality: i32,
    pub was_correct: bool,
    pub reviewed_on: NaiveDate,
    pub created_at: DateTime<Utc>,
}

/// Deck info with counts
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DeckInfo {
    pub id: i64,
    pub name: String,
    pub algorithm: String,
    pub card_count: i32,
    pub due_count: i32,
}

// === API Request/Response Types ===

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RegisterResponse {
    pub user_id: Uuid,
    pub token: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MeResponse {
    pub user_id: Uuid,
    pub username: String,
    pub created_at: DateTime<Utc>,
    pub last_seen_at: DateTime<Utc>,
}

// Deck types
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateDeckRequest {
    pub name: String,
    #[serde(default)]
    pub algorithm: Option<Algorithm>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeckResponse {
    pub id: i64,
    pub name: String,
    pub algorithm: Algorithm,
    pub created_at: DateTime<Utc>,
}

impl DeckResponse {
    pub fn from_db(deck: &DbDeck) -> Self {
        Self {
            id: deck.id,
            name: deck.name.clone(),
            algorithm: deck.algorithm(),
            created_at: deck.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DeckListResponse {
    pub decks: Vec<DeckInfo>,
}

// Card types
#[derive(Debug, Serialize, Deserialize)]
pub struct CreateCardRequest {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardResponse {
    pub id: i64,
    pub deck_id: i64,
    pub question: String,
    pub answer: String,
    #[serde(flatten)]
    pub schedule: CardSchedule,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CardListResponse {
    pub cards: Vec<CardResponse>,
}

// Study types
#[derive(Debug, Serialize, Deserialize)]
pub struct AsOfQuery {
    /// Reference date; defaults to the current UTC date.
    pub as_of: Option<NaiveDate>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DueResponse {
    pub card_ids: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct LeitnerReviewRequest {
    pub card_id: i64,
    pub correct: bool,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Sm2ReviewRequest {
    pub card_id: i64,
    pub quality: u8,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ReviewResponse {
    #[serde(flatten)]
    pub schedule: CardSchedule,
}
