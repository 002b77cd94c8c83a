//! Ranking: base relevance plus deterministic domain bonus, top-K by stable sort.

use serde::Serialize;

use crate::core::Profile;

/// Bonus per completed two-year block of experience.
pub const EXPERIENCE_STEP_BONUS: f32 = 0.05;
/// Experience blocks that earn a bonus.
pub const EXPERIENCE_STEP_CAP: u32 = 2;
/// Bonus for `availability == "available"`.
pub const AVAILABILITY_BONUS: f32 = 0.10;

/// Which scoring path produced the base score of a ranking pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RankPath {
    Semantic,
    Keyword,
}

impl std::fmt::Display for RankPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Semantic => write!(f, "semantic"),
            Self::Keyword => write!(f, "keyword"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoredProfile {
    pub profile: Profile,
    pub score: f32,
    pub base: f32,
    pub bonus: f32,
}

/// `min(2, floor(years / 2)) * 0.05`, plus `0.10` when available. At most `0.20`.
pub fn domain_bonus(profile: &Profile) -> f32 {
    let steps = (profile.experience_years / 2).min(EXPERIENCE_STEP_CAP);
    #[allow(clippy::cast_precision_loss)]
    let experience = steps as f32 * EXPERIENCE_STEP_BONUS;
    let availability = if profile.is_available() {
        AVAILABILITY_BONUS
    } else {
        0.0
    };
    experience + availability
}

/// Combine `base` scores (aligned with `profiles`) with the domain bonus and
/// keep the best `k`.
///
/// Sorting is stable on descending score, so equal scores keep collection
/// order. `k` larger than the collection is clamped.
pub fn top_k(profiles: &[Profile], base: &[f32], k: usize) -> Vec<ScoredProfile> {
    let mut scored: Vec<ScoredProfile> = profiles
        .iter()
        .zip(base)
        .map(|(profile, &base)| {
            let bonus = domain_bonus(profile);
            ScoredProfile {
                profile: profile.clone(),
                score: base + bonus,
                base,
                bonus,
            }
        })
        .collect();

    scored.sort_by(|a, b| b.score.total_cmp(&a.score));
    scored.truncate(k.min(profiles.len()));
    scored
}
