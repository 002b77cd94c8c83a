use proptest::prelude::*;

use roster::answer::fallback_answer;
use roster::core::Profile;
use roster::search::keyword_score;

prop_compose! {
    fn arb_profile()(
        id in 0i64..1000,
        name in "[A-Za-z]{1,16}",
        title in "[A-Za-z]{0,20}",
        skills in prop::collection::vec("[a-z+#.]{1,8}", 0..6),
        experience_years in 0u32..40,
        projects in prop::collection::vec("[A-Za-z]{1,12}", 0..3),
        domain in prop::option::of(prop::collection::vec("[a-z]{1,10}", 0..3)),
        location in prop::option::of("[A-Za-z]{1,10}"),
        availability in prop::sample::select(vec!["available", "busy", "on leave", "Available"]),
    ) -> Profile {
        Profile {
            id,
            name,
            title,
            skills,
            experience_years,
            projects,
            domain_experience: domain,
            location,
            availability: availability.to_string(),
        }
    }
}

proptest! {
    #[test]
    fn test_projection_deterministic(profile in arb_profile()) {
        prop_assert_eq!(profile.project(), profile.clone().project());
    }

    #[test]
    fn test_projection_has_no_empty_segments(profile in arb_profile()) {
        let projected = profile.project();
        prop_assert!(projected.split(" | ").all(|segment| !segment.is_empty()));
    }

    #[test]
    fn test_keyword_score_bounded(text in ".{0,80}", query in ".{0,40}") {
        let score = keyword_score(&text, &query);
        prop_assert!((0.0..=1.0).contains(&score));
    }

    #[test]
    fn test_query_found_in_own_text(query in "[a-z]{1,8}( [a-z]{1,8}){0,3}") {
        prop_assert_eq!(keyword_score(&query, &query), 1.0);
    }

    #[test]
    fn test_fallback_answer_deterministic(profiles in prop::collection::vec(arb_profile(), 0..6)) {
        let first = fallback_answer(&profiles);
        prop_assert_eq!(&first, &fallback_answer(&profiles));
        prop_assert!(first.ends_with('?'));
        prop_assert!(first.matches('•').count() <= 3);
    }
}
