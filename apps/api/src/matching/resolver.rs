//! Match Resolver: turns detected reciprocity into exactly one match row.
//!
//! Creation must tolerate the race where both sides of a reciprocal pair
//! resolve at the same time: the insert is conflict-tolerant on the unordered
//! (user1, user2) pair, and the loser fetches the winning row.

use anyhow::anyhow;
use sqlx::types::Json;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis::{self, CompatibilityAnalysis};
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::models::matching::MatchRow;
use crate::models::profile::ProfileRow;

/// Result of a match resolution: the match row (new or pre-existing) plus the
/// analyzer output, so callers can render the celebration UI.
pub struct MatchOutcome {
    pub record: MatchRow,
    pub analysis: CompatibilityAnalysis,
    /// False when a concurrent attempt from the other side won the insert.
    pub created: bool,
}

/// Resolves a freshly detected mutual like between `acting` and `target`.
/// The analyzer soft-fails, so an AI outage never blocks the match.
pub async fn resolve_mutual_match(
    pool: &PgPool,
    llm: &LlmClient,
    acting: &ProfileRow,
    target: &ProfileRow,
) -> Result<MatchOutcome, AppError> {
    let analysis = analysis::analyze_compatibility(llm, acting, target).await;
    let outcome = create_match(pool, acting.id, target.id, analysis).await?;

    if outcome.created {
        info!(
            "Match {} created for pair ({}, {}) with score {}",
            outcome.record.id, acting.id, target.id, outcome.record.compatibility_score
        );
    }
    Ok(outcome)
}

/// Inserts the match for (user1, user2), treating a uniqueness conflict on
/// the unordered pair as success by fetching the existing row.
pub async fn create_match(
    pool: &PgPool,
    user1_id: Uuid,
    user2_id: Uuid,
    analysis: CompatibilityAnalysis,
) -> Result<MatchOutcome, AppError> {
    let inserted: Option<MatchRow> = sqlx::query_as(
        r#"
        INSERT INTO matches (user1_id, user2_id, compatibility_score, analysis_summary)
        VALUES ($1, $2, $3, $4)
        ON CONFLICT DO NOTHING
        RETURNING *
        "#,
    )
    .bind(user1_id)
    .bind(user2_id)
    .bind(analysis.score)
    .bind(Json(&analysis.summary))
    .fetch_optional(pool)
    .await?;

    match inserted {
        Some(record) => Ok(MatchOutcome {
            record,
            analysis,
            created: true,
        }),
        None => {
            // The reciprocal swipe resolved first; its row wins.
            let existing = fetch_match_for_pair(pool, user1_id, user2_id)
                .await?
                .ok_or_else(|| {
                    AppError::Internal(anyhow!(
                        "match insert conflicted but no row exists for pair ({user1_id}, {user2_id})"
                    ))
                })?;
            let analysis = CompatibilityAnalysis {
                score: existing.compatibility_score,
                summary: existing.analysis_summary.0.clone(),
            };
            Ok(MatchOutcome {
                record: existing,
                analysis,
                created: false,
            })
        }
    }
}

/// The match for the unordered pair {a, b}, if one exists.
pub async fn fetch_match_for_pair(
    pool: &PgPool,
    a: Uuid,
    b: Uuid,
) -> Result<Option<MatchRow>, AppError> {
    let existing: Option<MatchRow> = sqlx::query_as(
        r#"
        SELECT * FROM matches
        WHERE (user1_id = $1 AND user2_id = $2)
           OR (user1_id = $2 AND user2_id = $1)
        "#,
    )
    .bind(a)
    .bind(b)
    .fetch_optional(pool)
    .await?;

    Ok(existing)
}

pub async fn fetch_match(pool: &PgPool, match_id: Uuid) -> Result<MatchRow, AppError> {
    let record: Option<MatchRow> = sqlx::query_as("SELECT * FROM matches WHERE id = $1")
        .bind(match_id)
        .fetch_optional(pool)
        .await?;

    record.ok_or_else(|| AppError::NotFound(format!("Match {match_id} not found")))
}

/// All matches the user participates in, newest first.
pub async fn matches_for_user(pool: &PgPool, user_id: Uuid) -> Result<Vec<MatchRow>, AppError> {
    let rows: Vec<MatchRow> = sqlx::query_as(
        r#"
        SELECT * FROM matches
        WHERE user1_id = $1 OR user2_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(pool)
    .await?;

    Ok(rows)
}
