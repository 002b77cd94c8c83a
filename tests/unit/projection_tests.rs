use roster::core::{Profile, ProfileStore};
use roster::search::{keyword_score, tokenize};

fn sample() -> Profile {
    Profile {
        id: 7,
        name: "Ann".to_string(),
        title: "Data Engineer".to_string(),
        skills: vec!["python".to_string(), "docker".to_string()],
        experience_years: 5,
        projects: vec!["Claims pipeline".to_string()],
        domain_experience: Some(vec!["insurance".to_string()]),
        location: Some("Lisbon".to_string()),
        availability: "available".to_string(),
    }
}

#[test]
fn projection_segments_in_order() {
    assert_eq!(
        sample().project(),
        "Ann | Data Engineer | experience 5 years | python, docker | Claims pipeline | insurance | Lisbon | available"
    );
}

#[test]
fn keyword_scoring_over_projection() {
    let text = sample().project();
    assert_eq!(keyword_score(&text, "Python"), 1.0);
    assert_eq!(keyword_score(&text, "python rust"), 0.5);
    assert_eq!(keyword_score(&text, "   "), 0.0);
}

#[test]
fn tokenizer_keeps_language_names() {
    assert_eq!(tokenize("C#, C++ and node.js!"), vec!["c#", "c++", "and", "node.js"]);
}

#[test]
fn store_projections_align_with_profiles() {
    let mut other = sample();
    other.id = 8;
    other.name = "Bo".to_string();
    let store = ProfileStore::from_profiles(vec![sample(), other]);
    let projections = store.projections();
    assert_eq!(projections.len(), 2);
    assert!(projections[1].starts_with("Bo | "));
}
