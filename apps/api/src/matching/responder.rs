//! Scripted reciprocity for seeded demo profiles.
//!
//! Modeled as a pluggable strategy so the resolver core stays uniform: the
//! swipe handler classifies the target through `SyntheticCounterpart` and the
//! demo behavior decorates the ordinary resolution path. Real profiles never
//! take this branch.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::analysis;
use crate::chat::hub::ChatHub;
use crate::errors::AppError;
use crate::llm_client::LlmClient;
use crate::matching::recorder::record_swipe;
use crate::matching::resolver::{create_match, MatchOutcome};
use crate::models::matching::{MessageRow, SwipeAction};
use crate::models::profile::ProfileRow;

/// Fixed ids of the seeded demo profiles. These guarantee a new user sees at
/// least one match without a second real user.
pub const MOCK_IDS: [&str; 3] = [
    "11111111-1111-1111-1111-111111111111",
    "22222222-2222-2222-2222-222222222222",
    "33333333-3333-3333-3333-333333333333",
];

/// Classifies swipe targets as real or seeded-demo and supplies the scripted
/// instant reciprocity for the latter.
#[async_trait]
pub trait SyntheticCounterpart: Send + Sync {
    fn is_synthetic(&self, profile_id: Uuid) -> bool;

    /// Simulates the demo profile liking `user` back: synthetic like, match
    /// creation under the resolver's idempotency rule, and an icebreaker as
    /// the first message. Must only be called for synthetic targets.
    async fn reciprocate(
        &self,
        pool: &PgPool,
        llm: &LlmClient,
        hub: &ChatHub,
        user: &ProfileRow,
        mock: &ProfileRow,
    ) -> Result<MatchOutcome, AppError>;
}

/// The production roster: the three seeded demo profiles.
pub struct MockRoster {
    ids: Vec<Uuid>,
}

impl MockRoster {
    pub fn new() -> Self {
        Self {
            ids: MOCK_IDS
                .iter()
                .map(|s| Uuid::parse_str(s).expect("mock roster ids are valid UUIDs"))
                .collect(),
        }
    }

    pub fn ids(&self) -> &[Uuid] {
        &self.ids
    }
}

impl Default for MockRoster {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SyntheticCounterpart for MockRoster {
    fn is_synthetic(&self, profile_id: Uuid) -> bool {
        self.ids.contains(&profile_id)
    }

    async fn reciprocate(
        &self,
        pool: &PgPool,
        llm: &LlmClient,
        hub: &ChatHub,
        user: &ProfileRow,
        mock: &ProfileRow,
    ) -> Result<MatchOutcome, AppError> {
        // 1. The mock likes back immediately. Upsert keeps this idempotent.
        record_swipe(pool, mock.id, user.id, SwipeAction::Like).await?;

        // 2 & 3. Analyze and create the match under the same conflict rule as
        // organic resolution. Analyzer failure soft-fails inside.
        let analysis = analysis::analyze_compatibility(llm, user, mock).await;
        let outcome = create_match(pool, user.id, mock.id, analysis).await?;

        // 4. First message from the mock, only when this call won the insert.
        // A lost race means the icebreaker was already sent.
        if outcome.created {
            let icebreaker = analysis::generate_icebreaker(llm, user, mock).await;
            let message: MessageRow = sqlx::query_as(
                r#"
                INSERT INTO messages (match_id, sender_id, content)
                VALUES ($1, $2, $3)
                RETURNING *
                "#,
            )
            .bind(outcome.record.id)
            .bind(mock.id)
            .bind(&icebreaker)
            .fetch_one(pool)
            .await?;
            hub.publish(&message);

            info!(
                "Mock profile {} reciprocated user {} (match {})",
                mock.id, user.id, outcome.record.id
            );
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_contains_fixed_ids() {
        let roster = MockRoster::new();
        for id in MOCK_IDS {
            assert!(roster.is_synthetic(Uuid::parse_str(id).unwrap()));
        }
    }

    #[test]
    fn test_real_profile_is_not_synthetic() {
        let roster = MockRoster::new();
        assert!(!roster.is_synthetic(Uuid::new_v4()));
    }
}
