//! Core scheduling library for the cardbox study service.
//!
//! Provides:
//! - Leitner (3-box) and SM-2 spaced repetition schedulers
//! - Due-card selection
//! - Progress analytics (accuracy, consecutive-day streak)
//! - Shared types (CardSchedule, Quality, ReviewRecord, etc.)
//!
//! The crate is pure: no I/O, no clock access. Every operation takes the
//! reference date as a parameter, so a transition is exactly reproducible
//! from its inputs.

pub mod error;
pub mod progress;
pub mod queue;
pub mod scheduler;
pub mod types;

pub use error::{Result, ScheduleError};
pub use progress::{compute_progress, streak};
pub use queue::due_cards;
pub use scheduler::{Leitner, SchedulingResult, Sm2};
pub use types::{
    Algorithm, CardSchedule, ProgressReport, Quality, ReviewRecord, ScheduleState, PASS_THRESHOLD,
};
