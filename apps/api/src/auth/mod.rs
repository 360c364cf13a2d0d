//! Identity boundary: resolves bearer credentials to stable user ids.
//!
//! Every profile/swipe/match/message operation is gated on the id this module
//! resolves; handlers receive it through the `AuthUser` extractor instead of
//! re-fetching ambient session state.

use async_trait::async_trait;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::state::AppState;

/// Exchanges a bearer credential for the stable user id it belongs to.
/// Carried in `AppState` as `Arc<dyn IdentityVerifier>` so tests can
/// substitute a static implementation.
#[async_trait]
pub trait IdentityVerifier: Send + Sync {
    async fn verify(&self, token: &str) -> Result<Uuid, AppError>;
}

/// Production verifier: asks the hosted identity provider who the token
/// belongs to. Any non-success answer is treated as an invalid session.
pub struct HttpIdentityVerifier {
    client: Client,
    identity_url: String,
}

#[derive(Debug, Deserialize)]
struct IdentityUser {
    id: Uuid,
}

impl HttpIdentityVerifier {
    pub fn new(identity_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(10))
                .build()
                .expect("Failed to build HTTP client"),
            identity_url,
        }
    }
}

#[async_trait]
impl IdentityVerifier for HttpIdentityVerifier {
    async fn verify(&self, token: &str) -> Result<Uuid, AppError> {
        let url = format!("{}/auth/v1/user", self.identity_url.trim_end_matches('/'));
        let response = self
            .client
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| {
                debug!("Identity provider unreachable: {e}");
                AppError::Unauthorized
            })?;

        if !response.status().is_success() {
            return Err(AppError::Unauthorized);
        }

        let user: IdentityUser = response.json().await.map_err(|_| AppError::Unauthorized)?;
        Ok(user.id)
    }
}

/// Extractor yielding the authenticated user's id from the
/// `Authorization: Bearer <token>` header.
#[derive(Debug, Clone, Copy)]
pub struct AuthUser(pub Uuid);

#[async_trait]
impl FromRequestParts<AppState> for AuthUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token = bearer_token(parts).ok_or(AppError::Unauthorized)?;
        let user_id = state.identity.verify(token).await?;
        Ok(AuthUser(user_id))
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(axum::http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|t| !t.is_empty())
}

/// Verifies `token` against the identity boundary. Used where the header
/// extractor does not apply, e.g. WebSocket upgrades carrying the token as a
/// query parameter.
pub async fn verify_token(state: &AppState, token: &str) -> Result<Uuid, AppError> {
    state.identity.verify(token).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts_with_auth(value: Option<&str>) -> Parts {
        let mut builder = Request::builder().uri("/");
        if let Some(v) = value {
            builder = builder.header(axum::http::header::AUTHORIZATION, v);
        }
        let (parts, _) = builder.body(()).unwrap().into_parts();
        parts
    }

    #[test]
    fn test_bearer_token_extraction() {
        let parts = parts_with_auth(Some("Bearer abc123"));
        assert_eq!(bearer_token(&parts), Some("abc123"));
    }

    #[test]
    fn test_bearer_token_missing_header() {
        let parts = parts_with_auth(None);
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_bearer_token_wrong_scheme() {
        let parts = parts_with_auth(Some("Basic abc123"));
        assert_eq!(bearer_token(&parts), None);
    }

    #[test]
    fn test_bearer_token_empty() {
        let parts = parts_with_auth(Some("Bearer "));
        assert_eq!(bearer_token(&parts), None);
    }
}
