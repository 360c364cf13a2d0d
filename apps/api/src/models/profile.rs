use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Weekly availability a founder is willing to commit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "commitment")]
pub enum Commitment {
    #[serde(rename = "Full-time")]
    #[sqlx(rename = "Full-time")]
    FullTime,
    #[serde(rename = "Part-time")]
    #[sqlx(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Weekends")]
    #[sqlx(rename = "Weekends")]
    Weekends,
}

impl Commitment {
    /// The user-facing label, identical to the wire and store encoding.
    pub fn label(&self) -> &'static str {
        match self {
            Commitment::FullTime => "Full-time",
            Commitment::PartTime => "Part-time",
            Commitment::Weekends => "Weekends",
        }
    }
}

/// A founder's public matching profile.
/// Owned and mutated only by the user it belongs to.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub name: String,
    pub avatar_url: Option<String>,
    pub role: String,
    /// Skill tags in the order the user entered them. Not deduplicated.
    pub skills: Vec<String>,
    pub commitment: Commitment,
    /// Free-form equity stance, e.g. "Equal Split" or "Salary + Equity".
    pub equity: String,
    pub bio: String,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_commitment_serde_uses_display_labels() {
        let json = serde_json::to_string(&Commitment::FullTime).unwrap();
        assert_eq!(json, "\"Full-time\"");
        let back: Commitment = serde_json::from_str("\"Weekends\"").unwrap();
        assert_eq!(back, Commitment::Weekends);
    }
}
