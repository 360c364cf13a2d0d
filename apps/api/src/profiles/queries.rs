use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::models::profile::{Commitment, ProfileRow};

pub async fn fetch_profile(pool: &PgPool, id: Uuid) -> Result<Option<ProfileRow>, AppError> {
    let profile: Option<ProfileRow> = sqlx::query_as("SELECT * FROM profiles WHERE id = $1")
        .bind(id)
        .fetch_optional(pool)
        .await?;
    Ok(profile)
}

pub async fn profiles_by_ids(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<ProfileRow>, AppError> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let profiles: Vec<ProfileRow> = sqlx::query_as("SELECT * FROM profiles WHERE id = ANY($1)")
        .bind(ids)
        .fetch_all(pool)
        .await?;
    Ok(profiles)
}

/// Create-or-replace the profile owned by `id`. The bio length is bounded by
/// the editing form, not here; the store accepts what the client sends.
pub struct ProfileUpsert<'a> {
    pub name: &'a str,
    pub avatar_url: Option<&'a str>,
    pub role: &'a str,
    pub skills: &'a [String],
    pub commitment: Commitment,
    pub equity: &'a str,
    pub bio: &'a str,
}

pub async fn upsert_profile(
    pool: &PgPool,
    id: Uuid,
    params: ProfileUpsert<'_>,
) -> Result<ProfileRow, AppError> {
    let profile: ProfileRow = sqlx::query_as(
        r#"
        INSERT INTO profiles (id, name, avatar_url, role, skills, commitment, equity, bio)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
        ON CONFLICT (id) DO UPDATE SET
            name = EXCLUDED.name,
            avatar_url = EXCLUDED.avatar_url,
            role = EXCLUDED.role,
            skills = EXCLUDED.skills,
            commitment = EXCLUDED.commitment,
            equity = EXCLUDED.equity,
            bio = EXCLUDED.bio
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(params.name)
    .bind(params.avatar_url)
    .bind(params.role)
    .bind(params.skills)
    .bind(params.commitment)
    .bind(params.equity)
    .bind(params.bio)
    .fetch_one(pool)
    .await?;

    Ok(profile)
}

/// Up to `limit` profiles the user has not swiped on yet, never including the
/// user themselves. A swipe on T keeps T out of every later candidate fetch.
pub async fn candidate_profiles(
    pool: &PgPool,
    user_id: Uuid,
    limit: i64,
) -> Result<Vec<ProfileRow>, AppError> {
    let profiles: Vec<ProfileRow> = sqlx::query_as(
        r#"
        SELECT * FROM profiles
        WHERE id <> $1
          AND id NOT IN (SELECT target_id FROM swipes WHERE swiper_id = $1)
        ORDER BY created_at ASC
        LIMIT $2
        "#,
    )
    .bind(user_id)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(profiles)
}

/// Case-insensitive substring search over name, role, and skill tags.
/// No ranking; an empty term returns everyone except the caller.
pub async fn search_profiles(
    pool: &PgPool,
    user_id: Uuid,
    term: &str,
    limit: i64,
) -> Result<Vec<ProfileRow>, AppError> {
    let pattern = format!("%{}%", term.trim());
    let profiles: Vec<ProfileRow> = sqlx::query_as(
        r#"
        SELECT * FROM profiles
        WHERE id <> $1
          AND (name ILIKE $2
               OR role ILIKE $2
               OR EXISTS (SELECT 1 FROM unnest(skills) AS skill WHERE skill ILIKE $2))
        ORDER BY created_at ASC
        LIMIT $3
        "#,
    )
    .bind(user_id)
    .bind(pattern)
    .bind(limit)
    .fetch_all(pool)
    .await?;

    Ok(profiles)
}
