//! Study endpoints

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use srs_core::{due_cards, Leitner, Quality, Sm2};
use uuid::Uuid;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// GET /api/decks/:id/due
pub async fn due(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(deck_id): Path<i64>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<DueResponse>> {
    let deck = state
        .db
        .get_deck(deck_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {}", deck_id)))?;

    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());
    let cards = state.db.get_cards_by_deck(deck.id).await?;

    let card_ids = due_cards(cards.iter().map(|card| (card.id, card.schedule())), as_of);

    Ok(Json(DueResponse { card_ids }))
}

/// POST /api/study/review/leitner
///
/// Legacy review mode: promotes or demotes the card's box. Writes no
/// ledger entry.
pub async fn review_leitner(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<LeitnerReviewRequest>,
) -> Result<Json<ReviewResponse>> {
    let card = state
        .db
        .get_card(payload.card_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

    let today = Utc::now().date_naive();
    let result = Leitner::default().review(&card.schedule(), payload.correct, today)?;

    state.db.update_card_schedule(card.id, &result.schedule).await?;

    Ok(Json(ReviewResponse {
        schedule: result.schedule,
    }))
}

/// POST /api/study/review/sm2
///
/// Grades the card 0-5, updates its SM-2 state, and appends an entry to
/// the review ledger.
pub async fn review_sm2(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<Sm2ReviewRequest>,
) -> Result<Json<ReviewResponse>> {
    let card = state
        .db
        .get_card(payload.card_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound("Card not found".to_string()))?;

    // Reject out-of-range grades before touching any state.
    let quality = Quality::new(payload.quality)?;

    let today = Utc::now().date_naive();
    let result = Sm2::default().review(&card.schedule(), quality, today)?;

    state.db.update_card_schedule(card.id, &result.schedule).await?;

    if let Some(record) = result.record {
        let review = DbReview {
            id: Uuid::new_v4(),
            card_id: card.id,
            user_id: auth.user_id,
            quality: i32::from(payload.quality),
            was_correct: record.correct,
            reviewed_on: record.reviewed_on,
            created_at: Utc::now(),
        };
        state.db.insert_review(&review).await?;
    }

    Ok(Json(ReviewResponse {
        schedule: result.schedule,
    }))
}
