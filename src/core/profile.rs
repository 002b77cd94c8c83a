//! Employee profile record and its canonical text projection.

use serde::{Deserialize, Serialize};

/// Availability value that earns the ranking bonus. Compared case-sensitively.
pub const AVAILABLE: &str = "available";

/// One employee record. Identity is `id`; updates replace the whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    pub name: String,
    pub title: String,
    pub skills: Vec<String>,
    pub experience_years: u32,
    pub projects: Vec<String>,
    #[serde(default)]
    pub domain_experience: Option<Vec<String>>,
    #[serde(default)]
    pub location: Option<String>,
    pub availability: String,
}

impl Profile {
    pub fn is_available(&self) -> bool {
        self.availability == AVAILABLE
    }

    /// Canonical single-string form used for both embedding and keyword scoring.
    ///
    /// Segments in fixed order: name, title, experience, skills, projects,
    /// domain experience, location, availability. Empty segments are dropped
    /// and the rest joined with `" | "`.
    pub fn project(&self) -> String {
        let domain = self
            .domain_experience
            .as_deref()
            .map(|items| items.join(", "))
            .unwrap_or_default();

        let parts = [
            self.name.clone(),
            self.title.clone(),
            format!("experience {} years", self.experience_years),
            self.skills.join(", "),
            self.projects.join(", "),
            domain,
            self.location.clone().unwrap_or_default(),
            self.availability.clone(),
        ];

        parts
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(" | ")
    }
}
