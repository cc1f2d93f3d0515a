//! Deck endpoints

use axum::{
    extract::{Path, Query, State},
    Extension, Json,
};
use chrono::Utc;
use srs_core::{compute_progress, ReviewRecord};

use crate::error::{ApiError, Result};
use crate::models::*;
use crate::routes::auth::AuthenticatedUser;
use crate::services::transfer::{self, DeckDocument};
use crate::AppState;

/// GET /api/decks
pub async fn list(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
) -> Result<Json<DeckListResponse>> {
    let decks = state.db.get_all_decks(auth.user_id).await?;
    Ok(Json(DeckListResponse { decks }))
}

/// POST /api/decks
pub async fn create(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(payload): Json<CreateDeckRequest>,
) -> Result<Json<DeckResponse>> {
    let name = payload.name.trim();
    if name.is_empty() {
        return Err(ApiError::BadRequest("deck name must not be empty".to_string()));
    }

    let algorithm = payload.algorithm.unwrap_or_default();
    let deck = state.db.create_deck(auth.user_id, name, algorithm).await?;

    Ok(Json(DeckResponse::from_db(&deck)))
}

/// DELETE /api/decks/:id
pub async fn remove(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(deck_id): Path<i64>,
) -> Result<Json<serde_json::Value>> {
    let deleted = state.db.delete_deck(deck_id, auth.user_id).await?;
    if !deleted {
        return Err(ApiError::NotFound(format!("Deck {}", deck_id)));
    }
    Ok(Json(serde_json::json!({ "deleted": true })))
}

/// GET /api/decks/:id/progress
pub async fn progress(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(deck_id): Path<i64>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<ProgressReport>> {
    let deck = state
        .db
        .get_deck(deck_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {}", deck_id)))?;

    let as_of = query.as_of.unwrap_or_else(|| Utc::now().date_naive());

    let schedules: Vec<(i64, CardSchedule)> = state
        .db
        .get_cards_by_deck(deck.id)
        .await?
        .iter()
        .map(|card| (card.id, card.schedule()))
        .collect();

    let reviews: Vec<(i64, ReviewRecord)> = state
        .db
        .get_reviews_for_deck(auth.user_id, deck.id)
        .await?
        .iter()
        .map(|review| {
            (
                review.card_id,
                ReviewRecord {
                    reviewed_on: review.reviewed_on,
                    correct: review.was_correct,
                },
            )
        })
        .collect();

    Ok(Json(compute_progress(&schedules, &reviews, as_of)))
}

/// GET /api/decks/:id/export
pub async fn export(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Path(deck_id): Path<i64>,
) -> Result<Json<DeckDocument>> {
    let deck = state
        .db
        .get_deck(deck_id, auth.user_id)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("Deck {}", deck_id)))?;

    let cards = state.db.get_cards_by_deck(deck.id).await?;

    Ok(Json(transfer::export_deck(&deck, &cards)))
}

/// POST /api/decks/import
pub async fn import(
    State(state): State<AppState>,
    Extension(auth): Extension<AuthenticatedUser>,
    Json(document): Json<DeckDocument>,
) -> Result<Json<DeckResponse>> {
    transfer::validate_document(&document)?;

    let deck = state
        .db
        .create_deck(auth.user_id, document.name.trim(), document.algorithm)
        .await?;

    for card in &document.cards {
        state
            .db
            .create_card(deck.id, &card.question, &card.answer, &card.schedule)
            .await?;
    }

    tracing::info!(
        "Imported deck {} with {} cards",
        deck.id,
        document.cards.len()
    );

    Ok(Json(DeckResponse::from_db(&deck)))
}
