//! SM-2 spaced repetition scheduler.
//!
//! Direct port of the SuperMemo 2 update rule with configurable
//! parameters.

use chrono::{Duration, NaiveDate};

use super::SchedulingResult;
use crate::error::{Result, ScheduleError};
use crate::types::{Algorithm, CardSchedule, Quality, ReviewRecord, ScheduleState};

/// SM-2 scheduler with configurable parameters.
#[derive(Debug, Clone)]
pub struct Sm2 {
    pub minimum_ease: f64,
    /// Interval after the first pass.
    pub first_interval: u32,
    /// Interval after the second consecutive pass.
    pub second_interval: u32,
}

impl Default for Sm2 {
    fn default() -> Self {
        Self {
            minimum_ease: 1.3,
            first_interval: 1,
            second_interval: 6,
        }
    }
}

impl Sm2 {
    /// Apply one graded review to an SM-2-scheduled card.
    ///
    /// A failing grade resets the repetition streak and interval but
    /// leaves the ease factor untouched. The returned record is the
    /// ledger entry for this review.
    pub fn review(
        &self,
        schedule: &CardSchedule,
        quality: Quality,
        today: NaiveDate,
    ) -> Result<SchedulingResult> {
        let (interval_days, ease_factor, repetitions) = match schedule.state {
            ScheduleState::Sm2 {
                interval_days,
                ease_factor,
                repetitions,
            } => (interval_days, ease_factor, repetitions),
            ScheduleState::Leitner { .. } => {
                return Err(ScheduleError::AlgorithmMismatch {
                    expected: Algorithm::Sm2,
                    found: Algorithm::Leitner,
                })
            }
        };

        let (new_interval, new_ease, new_repetitions) = if quality.is_pass() {
            // Interval grows from the ease factor as it was before this
            // review; the ease update lands afterwards.
            let interval = match repetitions {
                0 => self.first_interval,
                1 => self.second_interval,
                _ => (interval_days as f64 * ease_factor).round() as u32,
            };

            let q = f64::from(quality.value());
            let ease = ease_factor + (0.1 - (5.0 - q) * (0.08 + (5.0 - q) * 0.02));
            let ease = ease.max(self.minimum_ease);

            (interval, ease, repetitions + 1)
        } else {
            (self.first_interval, ease_factor, 0)
        };

        Ok(SchedulingResult {
            schedule: CardSchedule {
                state: ScheduleState::Sm2 {
                    interval_days: new_interval,
                    ease_factor: new_ease,
                    repetitions: new_repetitions,
                },
                last_reviewed: Some(today),
                next_review: today + Duration::days(i64::from(new_interval)),
            },
            record: Some(ReviewRecord {
                reviewed_on: today,
                correct: quality.is_pass(),
            }),
        })
    }
}
