//! Leitner 3-box scheduler.
//!
//! The legacy fixed-interval system: a correct answer promotes the card
//! one box, a wrong answer demotes it back to box 1, and each box maps to
//! a fixed number of days until the next review.

use chrono::{Duration, NaiveDate};

use super::SchedulingResult;
use crate::error::{Result, ScheduleError};
use crate::types::{Algorithm, CardSchedule, ScheduleState};

/// Leitner scheduler with fixed per-box intervals.
#[derive(Debug, Clone)]
pub struct Leitner {
    /// Days until next review for boxes 1-3.
    pub box_intervals: [i64; 3],
}

impl Default for Leitner {
    fn default() -> Self {
        Self {
            box_intervals: [1, 3, 7],
        }
    }
}

impl Leitner {
    /// Apply one review to a Leitner-scheduled card.
    ///
    /// Promotion is uncapped. A card promoted past box 3 has no interval
    /// mapping and keeps its previous due date; it stays in the rotation
    /// with a stale `next_review` until a wrong answer sends it back to
    /// box 1. The legacy variant writes no history entry.
    pub fn review(
        &self,
        schedule: &CardSchedule,
        correct: bool,
        today: NaiveDate,
    ) -> Result<SchedulingResult> {
        let box_number = match schedule.state {
            ScheduleState::Leitner { box_number } => box_number,
            ScheduleState::Sm2 { .. } => {
                return Err(ScheduleError::AlgorithmMismatch {
                    expected: Algorithm::Leitner,
                    found: Algorithm::Sm2,
                })
            }
        };

        let new_box = if correct { box_number + 1 } else { 1 };

        let next_review = match self.interval_for(new_box) {
            Some(days) => today + Duration::days(days),
            None => schedule.next_review,
        };

        Ok(SchedulingResult {
            schedule: CardSchedule {
                state: ScheduleState::Leitner {
                    box_number: new_box,
                },
                last_reviewed: Some(today),
                next_review,
            },
            record: None,
        })
    }

    fn interval_for(&self, box_number: u8) -> Option<i64> {
        match box_number {
            1..=3 => Some(self.box_intervals[usize::from(box_number) - 1]),
            _ => None,
        }
    }
}
