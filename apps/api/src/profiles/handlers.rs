use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;
use uuid::Uuid;

use crate::auth::AuthUser;
use crate::errors::AppError;
use crate::models::profile::{Commitment, ProfileRow};
use crate::profiles::queries::{
    candidate_profiles, fetch_profile, search_profiles, upsert_profile, ProfileUpsert,
};
use crate::state::AppState;

/// Candidate feed page size, matching the original product's card stack.
const CANDIDATE_LIMIT: i64 = 10;
const SEARCH_LIMIT: i64 = 50;

#[derive(Debug, Deserialize)]
pub struct ProfileRequest {
    pub name: String,
    pub avatar_url: Option<String>,
    pub role: String,
    pub skills: Vec<String>,
    pub commitment: Commitment,
    pub equity: String,
    pub bio: String,
}

/// PUT /api/v1/profile
///
/// First successful submission creates the profile; later submissions replace
/// it. Only the owner ever reaches this path, the id comes from the session.
pub async fn handle_put_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Json(req): Json<ProfileRequest>,
) -> Result<Json<ProfileRow>, AppError> {
    if req.name.trim().is_empty() {
        return Err(AppError::Validation("Name must not be empty".to_string()));
    }
    if req.role.trim().is_empty() {
        return Err(AppError::Validation("Role must not be empty".to_string()));
    }

    let profile = upsert_profile(
        &state.db,
        user_id,
        ProfileUpsert {
            name: req.name.trim(),
            avatar_url: req.avatar_url.as_deref(),
            role: req.role.trim(),
            skills: &req.skills,
            commitment: req.commitment,
            equity: &req.equity,
            bio: &req.bio,
        },
    )
    .await?;

    Ok(Json(profile))
}

/// GET /api/v1/profile — the caller's own profile.
/// 404 signals the client to route to onboarding.
pub async fn handle_get_own_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<ProfileRow>, AppError> {
    let profile = fetch_profile(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    Ok(Json(profile))
}

/// GET /api/v1/profiles/:id
pub async fn handle_get_profile(
    State(state): State<AppState>,
    AuthUser(_): AuthUser,
    Path(id): Path<Uuid>,
) -> Result<Json<ProfileRow>, AppError> {
    let profile = fetch_profile(&state.db, id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Profile {id} not found")))?;
    Ok(Json(profile))
}

/// GET /api/v1/profiles/candidates
pub async fn handle_candidates(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<ProfileRow>>, AppError> {
    let profiles = candidate_profiles(&state.db, user_id, CANDIDATE_LIMIT).await?;
    Ok(Json(profiles))
}

#[derive(Debug, Deserialize)]
pub struct SearchQuery {
    #[serde(default)]
    pub q: String,
}

/// GET /api/v1/profiles/search?q=
pub async fn handle_search(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    Query(params): Query<SearchQuery>,
) -> Result<Json<Vec<ProfileRow>>, AppError> {
    let profiles = search_profiles(&state.db, user_id, &params.q, SEARCH_LIMIT).await?;
    Ok(Json(profiles))
}
