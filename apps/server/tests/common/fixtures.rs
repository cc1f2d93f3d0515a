//! Test fixtures and factory functions for creating test data.

use serde_json::{json, Value};

/// Request body for creating a deck.
pub fn create_deck_request(name: &str, algorithm: &str) -> Value {
    json!({ "name": name, "algorithm": algorithm })
}

/// Request body for adding a card.
pub fn create_card_request(index: usize) -> Value {
    json!({
        "question": format!("Question {}?", index),
        "answer": format!("Answer {}.", index),
    })
}

/// Request body for an SM-2 review.
pub fn sm2_review(card_id: i64, quality: u8) -> Value {
    json!({ "card_id": card_id, "quality": quality })
}

/// Request body for a Leitner review.
pub fn leitner_review(card_id: i64, correct: bool) -> Value {
    json!({ "card_id": card_id, "correct": correct })
}

/// A small importable deck document.
pub fn deck_document(name: &str) -> Value {
    json!({
        "name": name,
        "algorithm": "sm2",
        "cards": [
            {
                "question": "Capital of France?",
                "answer": "Paris",
                "algorithm": "sm2",
                "interval_days": 6,
                "ease_factor": 2.6,
                "repetitions": 2,
                "last_reviewed": "2024-03-01",
                "next_review": "2024-03-07"
            },
            {
                "question": "Capital of Japan?",
                "answer": "Tokyo",
                "algorithm": "sm2",
                "interval_days": 1,
                "ease_factor": 2.5,
                "repetitions": 0,
                "next_review": "2024-03-02"
            }
        ]
    })
}
