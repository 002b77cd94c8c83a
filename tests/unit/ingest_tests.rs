use std::path::PathBuf;

use roster::RosterError;
use roster::ingest::{self, UploadFormat};

fn fixture_path(relative: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(relative)
}

#[test]
fn wrapped_json_fixture() {
    let profiles = ingest::parse_file(&fixture_path("profiles/team.json")).unwrap();
    assert_eq!(profiles.len(), 2);
    assert_eq!(profiles[0].domain_experience.as_deref(), Some(&["insurance".to_string()][..]));
    assert!(profiles[1].domain_experience.is_none());
    assert!(profiles[1].location.is_none());
}

#[test]
fn csv_fixture_defaults() {
    let profiles = ingest::parse_file(&fixture_path("profiles/team.csv")).unwrap();
    let ids: Vec<i64> = profiles.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![3, 4, 5]);

    let chidi = &profiles[0];
    assert_eq!(chidi.skills, vec!["python", "pytorch", "aws", "kubernetes", "sql"]);
    assert_eq!(chidi.projects, vec!["Fraud model", "Churn forecast"]);
    assert_eq!(chidi.experience_years, 8);

    let dana = &profiles[1];
    assert_eq!(dana.skills, vec!["react", "typescript", "c#"]);
    assert!(dana.location.is_none());
    assert_eq!(dana.availability, "on leave");

    let eli = &profiles[2];
    assert!(eli.projects.is_empty());
    assert_eq!(eli.domain_experience, Some(Vec::new()));
    assert_eq!(eli.location.as_deref(), Some("Seoul"));
    assert_eq!(eli.availability, "available");
}

#[test]
fn extension_detection_is_case_insensitive() {
    assert_eq!(
        UploadFormat::from_path(&PathBuf::from("TEAM.CSV")).unwrap(),
        UploadFormat::Csv
    );
    let err = UploadFormat::from_path(&PathBuf::from("team.xlsx")).unwrap_err();
    assert!(matches!(err, RosterError::UnsupportedFormat(_)));
    assert_eq!(err.code(), "unsupported_format");
}

#[test]
fn malformed_json_is_invalid_input() {
    let err = ingest::parse(UploadFormat::Json, br#"{"employees": [{"id": 1}]}"#).unwrap_err();
    assert!(matches!(err, RosterError::InvalidInput(_)));
    assert!(err.to_string().starts_with("Failed to parse"));
    assert!(err.to_string().contains("missing field `name`"), "{err}");
}

#[test]
fn short_csv_row_takes_defaults() {
    let text = b"id,name,title,skills,experience_years,projects,domain_experience,location,availability\n1,Ann\n";
    let profiles = ingest::parse(UploadFormat::Csv, text).unwrap();
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].name, "Ann");
    assert_eq!(profiles[0].experience_years, 0);
    assert_eq!(profiles[0].availability, "available");
}
