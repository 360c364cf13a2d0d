//! The fixed demo profile set. Seeding is an upsert so it can be re-run.

use sqlx::PgPool;
use uuid::Uuid;

use crate::errors::AppError;
use crate::matching::responder::MOCK_IDS;
use crate::models::profile::Commitment;

struct MockProfile {
    id: &'static str,
    name: &'static str,
    role: &'static str,
    skills: &'static [&'static str],
    commitment: Commitment,
    equity: &'static str,
    bio: &'static str,
    avatar_url: &'static str,
}

const MOCK_PROFILES: [MockProfile; 3] = [
    MockProfile {
        id: MOCK_IDS[0],
        name: "Sarah Chen",
        role: "Technical Co-Founder",
        skills: &["React", "Node.js", "AI/ML", "Python"],
        commitment: Commitment::FullTime,
        equity: "Equal Split",
        bio: "Ex-Google engineer looking to build the next big AI startup. \
              I handle the tech, you handle the business.",
        avatar_url: "https://images.unsplash.com/photo-1494790108377-be9c29b29330?w=400&h=400&fit=crop",
    },
    MockProfile {
        id: MOCK_IDS[1],
        name: "David Miller",
        role: "Growth & Marketing",
        skills: &["SEO", "Content Marketing", "Product Strategy"],
        commitment: Commitment::PartTime,
        equity: "Negotiable",
        bio: "Serial entrepreneur with 2 exits. Looking for a technical partner to build an MVP.",
        avatar_url: "https://images.unsplash.com/photo-1472099645785-5658abf4ff4e?w=400&h=400&fit=crop",
    },
    MockProfile {
        id: MOCK_IDS[2],
        name: "Elena Rodriguez",
        role: "Product Designer",
        skills: &["Figma", "UI/UX", "Branding", "Frontend"],
        commitment: Commitment::FullTime,
        equity: "Salary + Equity",
        bio: "Award-winning designer obsessed with user experience. Let's make something beautiful.",
        avatar_url: "https://images.unsplash.com/photo-1534528741775-53994a69daeb?w=400&h=400&fit=crop",
    },
];

pub async fn seed_mock_profiles(pool: &PgPool) -> Result<u64, AppError> {
    let mut seeded = 0;
    for mock in &MOCK_PROFILES {
        let skills: Vec<String> = mock.skills.iter().map(|s| s.to_string()).collect();
        sqlx::query(
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
            "#,
        )
        .bind(Uuid::parse_str(mock.id).expect("mock roster ids are valid UUIDs"))
        .bind(mock.name)
        .bind(mock.avatar_url)
        .bind(mock.role)
        .bind(&skills)
        .bind(mock.commitment)
        .bind(mock.equity)
        .bind(mock.bio)
        .execute(pool)
        .await?;
        seeded += 1;
    }
    Ok(seeded)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_set_matches_roster_ids() {
        let seeded: Vec<&str> = MOCK_PROFILES.iter().map(|m| m.id).collect();
        assert_eq!(seeded, MOCK_IDS.to_vec());
    }
}
