use axum::{
    extract::{Path, State},
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::analysis::CompatibilityAnalysis;
use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::matching::recorder::{like_exists, record_swipe};
use crate::matching::resolver::{
    fetch_match, matches_for_user, resolve_mutual_match, MatchOutcome,
};
use crate::models::matching::{MatchRow, SwipeAction};
use crate::models::profile::ProfileRow;
use crate::profiles::queries::{fetch_profile, profiles_by_ids};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct SwipeRequest {
    pub target_id: Uuid,
    pub action: SwipeAction,
}

#[derive(Debug, Serialize)]
pub struct SwipeResponse {
    pub matched: bool,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_record: Option<MatchRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis: Option<CompatibilityAnalysis>,
}

/// POST /api/v1/swipes
///
/// Records the swipe, then for a "like" runs match resolution: scripted
/// reciprocity for seeded demo targets, reciprocal-like detection otherwise.
pub async fn handle_swipe(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<SwipeRequest>,
) -> Result<Json<SwipeResponse>, AppError> {
    if req.target_id == user_id {
        return Err(AppError::Validation("Cannot swipe on yourself".to_string()));
    }

    let user = fetch_profile(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Complete onboarding first".to_string()))?;
    let target = fetch_profile(&state.db, req.target_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {} not found", req.target_id)))?;

    record_swipe(&state.db, user.id, target.id, req.action).await?;

    if req.action != SwipeAction::Like {
        return Ok(Json(SwipeResponse {
            matched: false,
            match_record: None,
            analysis: None,
        }));
    }

    let outcome: Option<MatchOutcome> = if state.responder.is_synthetic(target.id) {
        Some(
            state
                .responder
                .reciprocate(&state.db, &state.llm, &state.hub, &user, &target)
                .await?,
        )
    } else if like_exists(&state.db, target.id, user.id).await? {
        Some(resolve_mutual_match(&state.db, &state.llm, &user, &target).await?)
    } else {
        None
    };

    Ok(Json(match outcome {
        Some(outcome) => SwipeResponse {
            matched: true,
            match_record: Some(outcome.record),
            analysis: Some(outcome.analysis),
        },
        None => SwipeResponse {
            matched: false,
            match_record: None,
            analysis: None,
        },
    }))
}

/// A match as shown in the caller's match list: the row's public fields plus
/// the other participant's profile.
#[derive(Debug, Serialize)]
pub struct MatchSummary {
    pub id: Uuid,
    pub compatibility_score: i32,
    pub created_at: DateTime<Utc>,
    pub other: ProfileRow,
}

/// GET /api/v1/matches
pub async fn handle_list_matches(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<MatchSummary>>, AppError> {
    let matches = matches_for_user(&state.db, user_id).await?;

    let other_ids: Vec<Uuid> = matches.iter().map(|m| m.other_participant(user_id)).collect();
    let others = profiles_by_ids(&state.db, &other_ids).await?;

    let summaries = matches
        .into_iter()
        .filter_map(|m| {
            let other = others.iter().find(|p| p.id == m.other_participant(user_id))?;
            Some(MatchSummary {
                id: m.id,
                compatibility_score: m.compatibility_score,
                created_at: m.created_at,
                other: other.clone(),
            })
        })
        .collect();

    Ok(Json(summaries))
}

#[derive(Debug, Serialize)]
pub struct MatchDetail {
    pub id: Uuid,
    pub compatibility_score: i32,
    pub analysis_summary: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub user1: ProfileRow,
    pub user2: ProfileRow,
    /// The participant who is not the caller, for the chat header.
    pub other: ProfileRow,
}

/// GET /api/v1/matches/:id
pub async fn handle_get_match(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Path(match_id): Path<Uuid>,
) -> Result<Json<MatchDetail>, AppError> {
    let record = fetch_match(&state.db, match_id).await?;
    if !record.involves(user_id) {
        return Err(AppError::Forbidden);
    }

    let user1 = fetch_profile(&state.db, record.user1_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Participant profile missing".to_string()))?;
    let user2 = fetch_profile(&state.db, record.user2_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Participant profile missing".to_string()))?;
    let other = if user1.id == user_id {
        user2.clone()
    } else {
        user1.clone()
    };

    Ok(Json(MatchDetail {
        id: record.id,
        compatibility_score: record.compatibility_score,
        analysis_summary: record.analysis_summary.0,
        created_at: record.created_at,
        user1,
        user2,
        other,
    }))
}
