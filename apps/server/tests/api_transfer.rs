//! Deck export/import API tests.
//!
//! These tests require a running PostgreSQL database.
//! Set DATABASE_URL before running.

mod common;

use axum::http::StatusCode;
use axum_test::TestServer;

use common::fixtures;
use common::TestContext;

/// Test import creates a deck and export round-trips it.
#[tokio::test]
#[ignore = "requires database"]
async fn test_import_then_export_round_trips() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user("rosa").await;
    let auth = TestContext::auth_header_value(&token);

    let document = fixtures::deck_document("capitals");

    let imported = server
        .post("/api/decks/import")
        .add_header(axum::http::header::AUTHORIZATION, auth.clone())
        .json(&document)
        .await;
    imported.assert_status_ok();
    let deck_id = imported.json::<serde_json::Value>()["id"].as_i64().unwrap();

    let exported = server
        .get(&format!("/api/decks/{}/export", deck_id))
        .add_header(axum::http::header::AUTHORIZATION, auth)
        .await;
    exported.assert_status_ok();
    let body: serde_json::Value = exported.json();

    assert_eq!(body["name"], document["name"]);
    assert_eq!(body["algorithm"], document["algorithm"]);

    let exported_cards = body["cards"].as_array().unwrap();
    let original_cards = document["cards"].as_array().unwrap();
    assert_eq!(exported_cards.len(), original_cards.len());

    for (exported, original) in exported_cards.iter().zip(original_cards) {
        assert_eq!(exported["question"], original["question"]);
        assert_eq!(exported["answer"], original["answer"]);
        assert_eq!(exported["interval_days"], original["interval_days"]);
        assert_eq!(exported["ease_factor"], original["ease_factor"]);
        assert_eq!(exported["repetitions"], original["repetitions"]);
        assert_eq!(exported["next_review"], original["next_review"]);
    }

    ctx.cleanup_user(user_id).await;
}

/// Test a document mixing algorithms is rejected.
#[tokio::test]
#[ignore = "requires database"]
async fn test_import_rejects_mixed_algorithms() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user("saul").await;

    let mut document = fixtures::deck_document("mixed");
    document["cards"].as_array_mut().unwrap().push(serde_json::json!({
        "question": "Leitner straggler?",
        "answer": "Yes",
        "algorithm": "leitner",
        "box_number": 2,
        "next_review": "2024-03-02"
    }));

    let response = server
        .post("/api/decks/import")
        .add_header(
            axum::http::header::AUTHORIZATION,
            TestContext::auth_header_value(&token),
        )
        .json(&document)
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    ctx.cleanup_user(user_id).await;
}

/// Test importing over an existing deck name conflicts.
#[tokio::test]
#[ignore = "requires database"]
async fn test_import_existing_name_conflicts() {
    let ctx = TestContext::new().await;
    let server = TestServer::new(ctx.router()).unwrap();
    let (user_id, token) = ctx.create_test_user("tina").await;
    let auth = TestContext::auth_header_value(&token);

    let document = fixtures::deck_document("twice");

    let first = server
        .post("/api/decks/import")
        .add_header(axum::http::header::AUTHORIZATION, auth.clone())
        .json(&document)
        .await;
    first.assert_status_ok();

    let second = server
        .post("/api/decks/import")
        .add_header(axum::http::header::AUTHORIZATION, auth)
        .json(&document)
        .await;
    second.assert_status(StatusCode::CONFLICT);

    ctx.cleanup_user(user_id).await;
}
