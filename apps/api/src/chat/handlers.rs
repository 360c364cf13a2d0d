use axum::{
    extract::{Path, State},
    Json,
};
use serde::Deserialize;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::matching::resolver::fetch_match;
use crate::models::matching::{MatchRow, MessageRow};
use crate::state::AppState;

/// Loads the match and checks the caller is one of its two participants.
pub async fn authorized_match(
    pool: &PgPool,
    match_id: Uuid,
    user_id: Uuid,
) -> Result<MatchRow, AppError> {
    let record = fetch_match(pool, match_id).await?;
    if !record.involves(user_id) {
        return Err(AppError::Forbidden);
    }
    Ok(record)
}

/// GET /api/v1/matches/:id/messages
///
/// The full thread, ascending by creation time. Ties (same timestamp) break
/// on id so the order is stable across fetches.
pub async fn handle_list_messages(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(match_id): Path<Uuid>,
) -> Result<Json<Vec<MessageRow>>, AppError> {
    authorized_match(&state.db, match_id, user_id).await?;

    let messages: Vec<MessageRow> = sqlx::query_as(
        r#"
        SELECT * FROM messages
        WHERE match_id = $1
        ORDER BY created_at ASC, id ASC
        "#,
    )
    .bind(match_id)
    .fetch_all(&state.db)
    .await?;

    Ok(Json(messages))
}

#[derive(Debug, Deserialize)]
pub struct SendMessageRequest {
    pub content: String,
}

/// POST /api/v1/matches/:id/messages
pub async fn handle_send_message(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(match_id): Path<Uuid>,
    Json(req): Json<SendMessageRequest>,
) -> Result<Json<MessageRow>, AppError> {
    authorized_match(&state.db, match_id, user_id).await?;
    let message = store_message(&state, match_id, user_id, &req.content).await?;
    Ok(Json(message))
}

/// Inserts a message and fans it out to open viewers. The caller must have
/// verified match membership already.
pub async fn store_message(
    state: &AppState,
    match_id: Uuid,
    sender_id: Uuid,
    content: &str,
) -> Result<MessageRow, AppError> {
    let content = content.trim();
    if content.is_empty() {
        return Err(AppError::Validation(
            "Message content must not be empty".to_string(),
        ));
    }

    let message: MessageRow = sqlx::query_as(
        r#"
        INSERT INTO messages (match_id, sender_id, content)
        VALUES ($1, $2, $3)
        RETURNING *
        "#,
    )
    .bind(match_id)
    .bind(sender_id)
    .bind(content)
    .fetch_one(&state.db)
    .await?;

    state.hub.publish(&message);
    Ok(message)
}
