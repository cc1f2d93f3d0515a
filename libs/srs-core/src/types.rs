//! Core types for the cardbox scheduling engine.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::ScheduleError;

/// Quality at or above this grade counts as a pass.
pub const PASS_THRESHOLD: u8 = 3;

/// Scheduling algorithm options.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Algorithm {
    Leitner,
    Sm2,
}

impl Default for Algorithm {
    fn default() -> Self {
        Self::Sm2
    }
}

impl Algorithm {
    /// Get the algorithm name as a string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Leitner => "leitner",
            Self::Sm2 => "sm2",
        }
    }

    /// Parse from string.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "leitner" => Some(Self::Leitner),
            "sm2" => Some(Self::Sm2),
            _ => None,
        }
    }
}

impl std::fmt::Display for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Per-algorithm scheduling state.
///
/// A card carries the state of exactly one algorithm; which scheduler
/// applies is decided by the variant, never inferred from field values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "algorithm", rename_all = "snake_case")]
pub enum ScheduleState {
    Leitner {
        /// Review-frequency bucket, 1 = reviewed most often.
        box_number: u8,
    },
    Sm2 {
        /// Days until the next review.
        interval_days: u32,
        /// Growth multiplier for the interval, never below the SM-2 floor.
        ease_factor: f64,
        /// Consecutive passes since the last lapse.
        repetitions: u32,
    },
}

impl ScheduleState {
    /// Which algorithm this state belongs to.
    pub fn algorithm(&self) -> Algorithm {
        match self {
            Self::Leitner { .. } => Algorithm::Leitner,
            Self::Sm2 { .. } => Algorithm::Sm2,
        }
    }
}

/// Scheduling state of a single card.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CardSchedule {
    #[serde(flatten)]
    pub state: ScheduleState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_reviewed: Option<NaiveDate>,
    pub next_review: NaiveDate,
}

impl CardSchedule {
    /// Initial schedule for a card created on `created_on`.
    pub fn new(algorithm: Algorithm, created_on: NaiveDate) -> Self {
        let state = match algorithm {
            Algorithm::Leitner => ScheduleState::Leitner { box_number: 1 },
            Algorithm::Sm2 => ScheduleState::Sm2 {
                interval_days: 1,
                ease_factor: 2.5,
                repetitions: 0,
            },
        };

        Self {
            state,
            last_reviewed: None,
            next_review: created_on,
        }
    }

    /// Which algorithm schedules this card.
    pub fn algorithm(&self) -> Algorithm {
        self.state.algorithm()
    }

    /// Whether the card is due on `as_of`.
    pub fn is_due(&self, as_of: NaiveDate) -> bool {
        self.next_review <= as_of
    }
}

/// Validated 0-5 recall grade for an SM-2 review.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Quality(u8);

impl Quality {
    /// Validate a raw grade. Values above 5 are a caller contract
    /// violation and rejected before any card state is touched.
    pub fn new(value: u8) -> Result<Self, ScheduleError> {
        if value > 5 {
            return Err(ScheduleError::InvalidQuality(value));
        }
        Ok(Self(value))
    }

    pub fn value(self) -> u8 {
        self.0
    }

    /// Whether this grade counts as a successful recall.
    pub fn is_pass(self) -> bool {
        self.0 >= PASS_THRESHOLD
    }
}

/// One entry in the append-only review-history ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub reviewed_on: NaiveDate,
    pub correct: bool,
}

/// Aggregated study progress for a deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressReport {
    pub total_cards: usize,
    pub reviewed_cards: usize,
    pub correct_reviews: usize,
    /// Percentage of recorded reviews that were correct; 0 with no reviews.
    pub accuracy: f64,
    /// Consecutive calendar days ending today with at least one review.
    pub streak: u32,
}
