use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::IdentityVerifier;
use crate::chat::hub::ChatHub;
use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::matching::responder::SyntheticCounterpart;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub llm: LlmClient,
    pub config: Config,
    /// Identity boundary. Production: `HttpIdentityVerifier`.
    pub identity: Arc<dyn IdentityVerifier>,
    /// Classifies swipe targets as real or seeded-demo profiles and supplies
    /// the scripted reciprocity for the latter. Default: `MockRoster`.
    pub responder: Arc<dyn SyntheticCounterpart>,
    /// Per-match fanout of newly created messages to open chat viewers.
    pub hub: Arc<ChatHub>,
}
