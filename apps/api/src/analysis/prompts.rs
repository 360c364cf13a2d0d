//! Prompt templates for the compatibility analyzer and icebreaker generator.
//! Placeholders are substituted with rendered profile blocks before the call.

use crate::models::profile::ProfileRow;

/// System prompt enforcing JSON-only output for the compatibility analysis.
pub const ANALYSIS_SYSTEM: &str = "You are a precise, structured assistant. \
    You MUST respond with valid JSON only. \
    Do NOT include any text outside the JSON object. \
    Do NOT use markdown code fences. \
    Do NOT include explanations or apologies.";

pub const ANALYSIS_PROMPT: &str = "\
Analyze the compatibility between these two potential co-founders:

User 1:
{user1}

User 2:
{user2}

Provide a JSON response with:
1. \"score\": A compatibility score from 0 to 100.
2. \"summary\": A brief summary (3-4 bullet points) of strengths and potential concerns.";

/// System prompt for the icebreaker. Plain text, no JSON.
pub const ICEBREAKER_SYSTEM: &str = "You are a friendly, professional assistant. \
    Respond with the message text only. \
    Do NOT include quotation marks, markdown, or any commentary.";

pub const ICEBREAKER_PROMPT: &str = "\
Generate a short, friendly, and professional icebreaker message from User 2 to User 1.

User 1 (Recipient):
{user1}

User 2 (Sender):
{user2}

The message should mention a shared interest or complementary skill. Keep it under 2 sentences.
Just return the message text, no quotes.";

/// Renders the profile fields the prompts embed: role, skills, commitment,
/// equity stance, bio. Identity fields (name, avatar) are deliberately left
/// out of the model's view.
pub fn render_profile(profile: &ProfileRow) -> String {
    format!(
        "Role: {}\nSkills: {}\nCommitment: {}\nEquity Expectations: {}\nBio: {}",
        profile.role,
        profile.skills.join(", "),
        profile.commitment.label(),
        profile.equity,
        profile.bio,
    )
}

pub fn build_analysis_prompt(user1: &ProfileRow, user2: &ProfileRow) -> String {
    ANALYSIS_PROMPT
        .replace("{user1}", &render_profile(user1))
        .replace("{user2}", &render_profile(user2))
}

pub fn build_icebreaker_prompt(recipient: &ProfileRow, sender: &ProfileRow) -> String {
    ICEBREAKER_PROMPT
        .replace("{user1}", &render_profile(recipient))
        .replace("{user2}", &render_profile(sender))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn profile(role: &str, skills: &[&str]) -> ProfileRow {
        ProfileRow {
            id: Uuid::new_v4(),
            name: "Test Founder".to_string(),
            avatar_url: None,
            role: role.to_string(),
            skills: skills.iter().map(|s| s.to_string()).collect(),
            commitment: crate::models::profile::Commitment::FullTime,
            equity: "Equal Split".to_string(),
            bio: "Building things.".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_render_profile_includes_all_prompt_fields() {
        let rendered = render_profile(&profile("CTO", &["Rust", "ML"]));
        assert!(rendered.contains("Role: CTO"));
        assert!(rendered.contains("Skills: Rust, ML"));
        assert!(rendered.contains("Commitment: Full-time"));
        assert!(rendered.contains("Equity Expectations: Equal Split"));
        assert!(rendered.contains("Bio: Building things."));
    }

    #[test]
    fn test_render_profile_omits_identity_fields() {
        let rendered = render_profile(&profile("CTO", &[]));
        assert!(!rendered.contains("Test Founder"));
    }

    #[test]
    fn test_analysis_prompt_orders_acting_user_first() {
        let a = profile("CEO", &["Sales"]);
        let b = profile("CTO", &["Rust"]);
        let prompt = build_analysis_prompt(&a, &b);
        let ceo_pos = prompt.find("Role: CEO").unwrap();
        let cto_pos = prompt.find("Role: CTO").unwrap();
        assert!(ceo_pos < cto_pos);
        assert!(!prompt.contains("{user1}"));
        assert!(!prompt.contains("{user2}"));
    }
}
