//! Card endpoints

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use chrono::Utc;

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::AppState;

/// POST /api/decks/:id/cards
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(deck_id): Path<i64>,
    Json(payload): Json<CreateCardRequest>,
) -> Result<Json<CardResponse>> {
    let deck = state
        .db
        .get_deck(deck_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {}", deck_id)))?;

    if payload.question.trim().is_empty() || payload.answer.trim().is_empty() {
        return Err(ApiError::BadRequest(
            "question and answer must not be empty".to_string(),
        ));
    }

    // New cards start in the deck's algorithm with default state, due today.
    let schedule = CardSchedule::new(deck.algorithm(), Utc::now().date_naive());

    let card = state
        .db
        .create_card(deck.id, &payload.question, &payload.answer, &schedule)
        .await?;

    Ok(Json(card.to_api_card()))
}

/// GET /api/decks/:id/cards
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(deck_id): Path<i64>,
) -> Result<Json<CardListResponse>> {
    let deck = state
        .db
        .get_deck(deck_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {}", deck_id)))?;

    let cards = state.db.get_cards_by_deck(deck.id).await?;

    Ok(Json(CardListResponse {
        cards: cards.iter().map(DbCard::to_api_card).collect(),
    }))
}

/// DELETE /api/cards/:id
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(card_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let deleted = state.db.delete_card(card_id, auth.user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("Card {}", card_id)));
    }
    Ok(Json(serde_json::json!({ "deleted": true })))
}
