use proptest::prelude::*;

use roster::core::Profile;
use roster::search::{domain_bonus, top_k};

fn numbered(n: usize, years: &[u32], available: &[bool]) -> Vec<Profile> {
    (0..n)
        .map(|i| Profile {
            id: i64::try_from(i).unwrap_or_default(),
            name: format!("P{i}"),
            title: "Engineer".to_string(),
            skills: Vec::new(),
            experience_years: years[i],
            projects: Vec::new(),
            domain_experience: None,
            location: None,
            availability: if available[i] { "available" } else { "busy" }.to_string(),
        })
        .collect()
}

prop_compose! {
    fn arb_collection()(n in 0usize..20)(
        years in prop::collection::vec(0u32..30, n),
        available in prop::collection::vec(any::<bool>(), n),
        base in prop::collection::vec(-1.0f32..1.0, n),
        n in Just(n),
    ) -> (Vec<Profile>, Vec<f32>) {
        (numbered(n, &years, &available), base)
    }
}

proptest! {
    #[test]
    fn test_bonus_capped((profiles, _base) in arb_collection()) {
        for profile in &profiles {
            let bonus = domain_bonus(profile);
            prop_assert!((0.0..=0.2 + 1e-6).contains(&bonus));
        }
    }

    #[test]
    fn test_top_k_length((profiles, base) in arb_collection(), k in 0usize..30) {
        prop_assert_eq!(top_k(&profiles, &base, k).len(), k.min(profiles.len()));
    }

    #[test]
    fn test_top_k_descending((profiles, base) in arb_collection(), k in 0usize..30) {
        let ranked = top_k(&profiles, &base, k);
        for pair in ranked.windows(2) {
            prop_assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_top_k_ties_keep_collection_order((profiles, _base) in arb_collection()) {
        let flat = vec![0.0; profiles.len()];
        let ranked = top_k(&profiles, &flat, profiles.len());
        for pair in ranked.windows(2) {
            if pair[0].score == pair[1].score {
                prop_assert!(pair[0].profile.id < pair[1].profile.id);
            }
        }
    }

    #[test]
    fn test_score_is_base_plus_bonus((profiles, base) in arb_collection()) {
        for scored in top_k(&profiles, &base, profiles.len()) {
            prop_assert!((scored.score - (scored.base + scored.bonus)).abs() < 1e-6);
            prop_assert!((scored.bonus - domain_bonus(&scored.profile)).abs() < 1e-9);
        }
    }
}
