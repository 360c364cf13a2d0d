//! Operator maintenance endpoints: seed the demo roster, wipe non-demo data,
//! delete a single account. Not part of the matching core.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::errors::AppError;
use crate::state::AppState;

pub mod handlers;
pub mod seed;

/// Extractor gating operator endpoints on the `x-admin-token` header.
pub struct AdminAuth;

#[async_trait]
impl FromRequestParts<AppState> for AdminAuth {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let supplied = parts
            .headers
            .get("x-admin-token")
            .and_then(|v| v.to_str().ok())
            .ok_or(AppError::Unauthorized)?;

        if supplied != state.config.admin_token {
            return Err(AppError::Forbidden);
        }
        Ok(AdminAuth)
    }
}
