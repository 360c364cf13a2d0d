use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

/// One-directional swipe decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "swipe_action", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SwipeAction {
    Like,
    Pass,
}

/// An immutable swipe decision, keyed by (swiper, target).
/// Re-swiping the same target upserts the action rather than duplicating.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct SwipeRow {
    pub swiper_id: Uuid,
    pub target_id: Uuid,
    pub action: SwipeAction,
    pub created_at: DateTime<Utc>,
}

/// A mutual-like pairing, enriched with the compatibility analysis.
/// At most one row exists per unordered (user1, user2) pair; the pair order
/// reflects who completed the match, not a canonical ordering.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MatchRow {
    pub id: Uuid,
    pub user1_id: Uuid,
    pub user2_id: Uuid,
    /// Integer in [0, 100]. 0 when the analyzer soft-failed.
    pub compatibility_score: i32,
    /// Ordered list of short human-readable analysis points. Never empty.
    pub analysis_summary: Json<Vec<String>>,
    pub created_at: DateTime<Utc>,
}

impl MatchRow {
    /// The participant who is not `user_id`. Callers must have verified
    /// membership first.
    pub fn other_participant(&self, user_id: Uuid) -> Uuid {
        if self.user1_id == user_id {
            self.user2_id
        } else {
            self.user1_id
        }
    }

    pub fn involves(&self, user_id: Uuid) -> bool {
        self.user1_id == user_id || self.user2_id == user_id
    }
}

/// A chat message within a match. Append-only, displayed ascending by
/// creation time.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct MessageRow {
    pub id: Uuid,
    pub match_id: Uuid,
    pub sender_id: Uuid,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn match_row(u1: Uuid, u2: Uuid) -> MatchRow {
        MatchRow {
            id: Uuid::new_v4(),
            user1_id: u1,
            user2_id: u2,
            compatibility_score: 50,
            analysis_summary: Json(vec!["point".to_string()]),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_other_participant() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let m = match_row(a, b);
        assert_eq!(m.other_participant(a), b);
        assert_eq!(m.other_participant(b), a);
    }

    #[test]
    fn test_involves() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let m = match_row(a, b);
        assert!(m.involves(a));
        assert!(m.involves(b));
        assert!(!m.involves(Uuid::new_v4()));
    }

    #[test]
    fn test_swipe_action_serde_lowercase() {
        assert_eq!(serde_json::to_string(&SwipeAction::Like).unwrap(), "\"like\"");
        let back: SwipeAction = serde_json::from_str("\"pass\"").unwrap();
        assert_eq!(back, SwipeAction::Pass);
    }
}
