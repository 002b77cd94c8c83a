//! Search results formatter
//!
//! Renders a ranking as styled terminal output (Human), TSV (Plain) or JSON.

use console::style;
use serde::Serialize;

use crate::cli::output::{Formattable, OutputFormat};
use crate::core::Profile;
use crate::search::{RankPath, Ranking};

/// Ranked profiles for one query, ready for display.
#[derive(Debug, Clone)]
pub struct SearchResults {
    pub query: String,
    pub ranking: Ranking,
    pub duration_ms: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
struct SearchResultJson<'a> {
    rank: usize,
    score: f32,
    base: f32,
    bonus: f32,
    #[serde(flatten)]
    profile: &'a Profile,
}

#[derive(Debug, Clone, Serialize)]
struct SearchResponseJson<'a> {
    status: &'static str,
    query: &'a str,
    path: RankPath,
    count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    duration_ms: Option<u64>,
    results: Vec<SearchResultJson<'a>>,
}

impl SearchResults {
    pub fn new(query: impl Into<String>, ranking: Ranking) -> Self {
        Self {
            query: query.into(),
            ranking,
            duration_ms: None,
        }
    }

    #[must_use]
    pub const fn with_duration(mut self, duration_ms: u64) -> Self {
        self.duration_ms = Some(duration_ms);
        self
    }

    fn to_json_response(&self) -> SearchResponseJson<'_> {
        SearchResponseJson {
            status: "ok",
            query: &self.query,
            path: self.ranking.path,
            count: self.ranking.results.len(),
            duration_ms: self.duration_ms,
            results: self
                .ranking
                .results
                .iter()
                .enumerate()
                .map(|(i, r)| SearchResultJson {
                    rank: i + 1,
                    score: r.score,
                    base: r.base,
                    bonus: r.bonus,
                    profile: &r.profile,
                })
                .collect(),
        }
    }

    fn format_human(&self) -> String {
        if self.ranking.results.is_empty() {
            return format!("No profiles matched {:?}.", self.query);
        }
        let mut lines = vec![format!(
            "{} {} ({} ranking)",
            style("Results for").bold(),
            style(&self.query).cyan(),
            self.ranking.path
        )];
        lines.push(String::new());
        for (i, r) in self.ranking.results.iter().enumerate() {
            let p = &r.profile;
            lines.push(format!(
                "{:>2}. {} — {} [{}]",
                i + 1,
                style(&p.name).bold(),
                p.title,
                style(format!("{:.3}", r.score)).green()
            ));
            lines.push(format!(
                "    {} yrs · {} · {}",
                p.experience_years,
                p.availability,
                p.skills.join(", ")
            ));
        }
        lines.join("\n")
    }

    fn format_plain(&self) -> String {
        self.ranking
            .results
            .iter()
            .map(|r| {
                format!(
                    "{}\t{}\t{}\t{:.4}",
                    r.profile.id, r.profile.name, r.profile.title, r.score
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Formattable for SearchResults {
    fn format(&self, fmt: OutputFormat) -> String {
        match fmt {
            OutputFormat::Human => self.format_human(),
            OutputFormat::Json => {
                serde_json::to_string_pretty(&self.to_json_response()).unwrap_or_default()
            }
            OutputFormat::Plain => self.format_plain(),
        }
    }
}
