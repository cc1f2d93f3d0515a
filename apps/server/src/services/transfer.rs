//! Deck export/import documents.
//!
//! The portable deck format is a single JSON document carrying the deck
//! name, its algorithm, and every card with its full scheduling state, so
//! an export/import cycle never resets study progress. Building and
//! validating documents is pure; the deck routes do the database work.

use serde::{Deserialize, Serialize};

use crate::error::{ApiError, Result};
use crate::models::{Algorithm, CardSchedule, DbCard, DbDeck, ScheduleState};

/// Portable deck document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckDocument {
    pub name: String,
    pub algorithm: Algorithm,
    pub cards: Vec<CardDocument>,
}

/// One card inside a deck document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CardDocument {
    pub question: String,
    pub answer: String,
    #[serde(flatten)]
    pub schedule: CardSchedule,
}

/// Build the export document for a deck.
pub fn export_deck(deck: &DbDeck, cards: &[DbCard]) -> DeckDocument {
    DeckDocument {
        name: deck.name.clone(),
        algorithm: deck.algorithm(),
        cards: cards
            .iter()
            .map(|card| CardDocument {
                question: card.question.clone(),
                answer: card.answer.clone(),
                schedule: card.schedule(),
            })
            .collect(),
    }
}

/// Validate an import document before any rows are written.
///
/// Every card must be scheduled with the deck's declared algorithm, and
/// scheduling fields must satisfy the engine invariants (box >= 1,
/// interval >= 1, ease factor at or above the SM-2 floor).
pub fn validate_document(doc: &DeckDocument) -> Result<()> {
    if doc.name.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "deck name must not be empty".to_string(),
        ));
    }

    for (index, card) in doc.cards.iter().enumerate() {
        let invalid = |reason: &str| {
            ApiError::BadRequest(format!("card {}: {}", index + 1, reason))
        };

        if card.schedule.algorithm() != doc.algorithm {
            return Err(invalid(&format!(
                "scheduled with {}, deck declares {}",
                card.schedule.algorithm(),
                doc.algorithm
            )));
        }

        match card.schedule.state {
            ScheduleState::Leitner { box_number } => {
                if box_number == 0 {
                    return Err(invalid("box number must be at least 1"));
                }
            }
            ScheduleState::Sm2 {
                interval_days,
                ease_factor,
                ..
            } => {
                if interval_days == 0 {
                    return Err(invalid("interval must be at least 1 day"));
                }
                if ease_factor < 1.3 {
                    return Err(invalid("ease factor below the 1.3 floor"));
                }
            }
        }
    }

    Ok(())
}
