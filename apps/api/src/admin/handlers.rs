use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::{info, warn};
use uuid::Uuid;

use crate::admin::{seed::seed_mock_profiles, AdminAuth};
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::matching::responder::MOCK_IDS;
use crate::state::AppState;

fn mock_ids() -> Vec<Uuid> {
    MOCK_IDS
        .iter()
        .map(|s| Uuid::parse_str(s).expect("mock roster ids are valid UUIDs"))
        .collect()
}

/// POST /api/v1/admin/seed
pub async fn handle_seed(
    State(state): State<AppState>,
    _: AdminAuth,
) -> Result<Json<Value>, AppError> {
    let seeded = seed_mock_profiles(&state.db).await?;
    info!("Seeded {seeded} mock profiles");
    Ok(Json(json!({ "success": true, "seeded": seeded })))
}

/// POST /api/v1/admin/wipe
///
/// Deletes all data except the mock roster and rows referencing only mocks.
/// Statements run independently; there is no all-or-nothing guarantee, a
/// partial failure is reported as a plain failure to the operator.
pub async fn handle_wipe(
    State(state): State<AppState>,
    _: AdminAuth,
) -> Result<Json<Value>, AppError> {
    let mocks = mock_ids();
    warn!("Wiping all non-demo data");

    sqlx::query("DELETE FROM messages WHERE sender_id <> ALL($1)")
        .bind(&mocks)
        .execute(&state.db)
        .await?;
    sqlx::query("DELETE FROM matches WHERE user1_id <> ALL($1) OR user2_id <> ALL($1)")
        .bind(&mocks)
        .execute(&state.db)
        .await?;
    sqlx::query("DELETE FROM swipes WHERE swiper_id <> ALL($1)")
        .bind(&mocks)
        .execute(&state.db)
        .await?;
    sqlx::query("DELETE FROM profiles WHERE id <> ALL($1)")
        .bind(&mocks)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "success": true })))
}

/// DELETE /api/v1/account
///
/// Self-service account deletion: the caller's swipes, every match they
/// participate in (thread messages cascade with the match), messages they
/// sent elsewhere, and the profile row. Other users' unrelated records stay.
pub async fn handle_delete_account(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Value>, AppError> {
    info!("Deleting account {user_id}");

    sqlx::query("DELETE FROM messages WHERE sender_id = $1")
        .bind(user_id)
        .execute(&state.db)
        .await?;
    sqlx::query("DELETE FROM matches WHERE user1_id = $1 OR user2_id = $1")
        .bind(user_id)
        .execute(&state.db)
        .await?;
    sqlx::query("DELETE FROM swipes WHERE swiper_id = $1")
        .bind(user_id)
        .execute(&state.db)
        .await?;
    sqlx::query("DELETE FROM profiles WHERE id = $1")
        .bind(user_id)
        .execute(&state.db)
        .await?;

    Ok(Json(json!({ "success": true })))
}
