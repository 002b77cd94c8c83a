use std::path::PathBuf;

use tempfile::TempDir;

use crate::core::Profile;

/// Test fixture providing an isolated roster root.
pub struct UnitTestFixture {
    pub temp_dir: TempDir,
    pub data_path: PathBuf,
}

impl Default for UnitTestFixture {
    fn default() -> Self {
        Self::new()
    }
}

impl UnitTestFixture {
    #[must_use]
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let data_path = temp_dir.path().to_path_buf();

        println!("[FIXTURE] Created temp directory: {data_path:?}");

        Self {
            temp_dir,
            data_path,
        }
    }

    /// Create a test file with content.
    #[must_use]
    pub fn create_file(&self, relative_path: &str, content: &str) -> PathBuf {
        let full_path = self.data_path.join(relative_path);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent dirs");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
        println!(
            "[FIXTURE] Created file: {:?} ({} bytes)",
            full_path,
            content.len()
        );
        full_path
    }

    /// Write `profiles` as the bootstrap snapshot `employees.json`.
    #[must_use]
    pub fn create_snapshot(&self, profiles: &[Profile]) -> PathBuf {
        let json = serde_json::to_string_pretty(profiles).expect("serialize profiles");
        self.create_file("employees.json", &json)
    }
}

impl Drop for UnitTestFixture {
    fn drop(&mut self) {
        println!("[FIXTURE] Cleaning up temp directory: {:?}", self.data_path);
    }
}

/// Minimal profile: no skills, no experience, not available.
#[must_use]
pub fn profile(id: i64, name: &str) -> Profile {
    Profile {
        id,
        name: name.to_string(),
        title: "Engineer".to_string(),
        skills: Vec::new(),
        experience_years: 0,
        projects: Vec::new(),
        domain_experience: None,
        location: None,
        availability: "busy".to_string(),
    }
}

/// Ann (python, 5y, available) and Bo (java, 1y, busy).
#[must_use]
pub fn ann_and_bo() -> Vec<Profile> {
    vec![
        Profile {
            id: 1,
            name: "Ann".to_string(),
            title: "Data Engineer".to_string(),
            skills: vec!["python".to_string(), "docker".to_string()],
            experience_years: 5,
            projects: vec!["Claims pipeline".to_string()],
            domain_experience: Some(vec!["insurance".to_string()]),
            location: Some("Lisbon".to_string()),
            availability: "available".to_string(),
        },
        Profile {
            id: 2,
            name: "Bo".to_string(),
            title: "Backend Developer".to_string(),
            skills: vec!["java".to_string()],
            experience_years: 1,
            projects: Vec::new(),
            domain_experience: None,
            location: None,
            availability: "busy".to_string(),
        },
    ]
}

/// A small but varied roster for ranking and answer tests.
#[must_use]
pub fn sample_roster() -> Vec<Profile> {
    let mut roster = ann_and_bo();
    roster.push(Profile {
        id: 3,
        name: "Chidi Okafor".to_string(),
        title: "ML Engineer".to_string(),
        skills: vec![
            "python".to_string(),
            "pytorch".to_string(),
            "aws".to_string(),
            "kubernetes".to_string(),
            "sql".to_string(),
        ],
        experience_years: 8,
        projects: vec!["Readmission risk model".to_string(), "Triage bot".to_string()],
        domain_experience: Some(vec!["healthcare".to_string()]),
        location: Some("Toronto".to_string()),
        availability: "available".to_string(),
    });
    roster.push(Profile {
        id: 4,
        name: "Dana Ruiz".to_string(),
        title: "Frontend Developer".to_string(),
        skills: vec!["react".to_string(), "typescript".to_string(), "c#".to_string()],
        experience_years: 3,
        projects: vec!["Patient portal".to_string()],
        domain_experience: Some(vec!["healthcare".to_string()]),
        location: None,
        availability: "on leave".to_string(),
    });
    roster
}
