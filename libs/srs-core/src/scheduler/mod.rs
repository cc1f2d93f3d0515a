//! Scheduling algorithm implementations.

pub mod leitner;
pub mod sm2;

pub use leitner::Leitner;
pub use sm2::Sm2;

use crate::types::{CardSchedule, ReviewRecord};

/// Result of applying one review to a card.
#[derive(Debug, Clone)]
pub struct SchedulingResult {
    /// The card's schedule after the transition.
    pub schedule: CardSchedule,
    /// Ledger entry to append, when the algorithm records history.
    /// The legacy Leitner scheduler never does.
    pub record: Option<ReviewRecord>,
}
