//! Swipe Recorder: the source of truth for "already seen" filtering.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::matching::{SwipeAction, SwipeRow};

/// Records a swipe decision. Swiping the same target again overwrites the
/// prior action instead of inserting a second row.
pub async fn record_swipe(
    pool: &PgPool,
    swiper_id: Uuid,
    target_id: Uuid,
    action: SwipeAction,
) -> Result<SwipeRow, AppError> {
    let swipe: SwipeRow = sqlx::query_as(
        r#"
        INSERT INTO swipes (swiper_id, target_id, action)
        VALUES ($1, $2, $3)
        ON CONFLICT (swiper_id, target_id) DO UPDATE SET action = EXCLUDED.action
        RETURNING *
        "#,
    )
    .bind(swiper_id)
    .bind(target_id)
    .bind(action)
    .fetch_one(pool)
    .await?;

    Ok(swipe)
}

/// Whether `from` has already recorded a "like" on `to`.
pub async fn like_exists(pool: &PgPool, from: Uuid, to: Uuid) -> Result<bool, AppError> {
    let exists: bool = sqlx::query_scalar(
        r#"
        SELECT EXISTS (
            SELECT 1 FROM swipes
            WHERE swiper_id = $1 AND target_id = $2 AND action = 'like'
        )
        "#,
    )
    .bind(from)
    .bind(to)
    .fetch_one(pool)
    .await?;

    Ok(exists)
}
