//! Answer composition
//!
//! Primary path asks the generation provider for a recommendation. Any
//! provider failure drops to [`fallback_answer`], which is deterministic and
//! never touches the network.

use serde::Serialize;
use tracing::{debug, warn};

use crate::core::Profile;
use crate::provider::Generator;

/// System instruction for the generation provider.
pub const SYSTEM_PROMPT: &str = "You are a helpful, warm HR talent advisor. Answer succinctly but human, conversational, and encouraging.\n\
- Input: the user's staffing query and up to 5 candidate employee profiles (JSON).\n\
- Task: Recommend the best 2-3 matches with rationale: skills, years of experience, domain projects, availability. Mention names first, then reasoning.\n\
- Tone: supportive, clear, and professional. Avoid bullet overload; use short paragraphs and compact bullets only when helpful.\n\
- If the query is vague, suggest clarifying questions.\n\
- End with a friendly, action-oriented question.";

const LEAD_IN: &str = "Here are strong matches I found based on your request:";
const CLOSING: &str = "Would you like me to confirm their availability for a kickoff or share more on their past projects?";
const NO_MATCHES: &str = "I couldn't find any matching profiles in the current roster. Would you like to upload more profiles or broaden the request?";

/// Candidates sent to the generator by default.
pub const PROMPT_CANDIDATES: usize = 5;
/// Candidates listed in the templated answer.
pub const FALLBACK_CANDIDATES: usize = 3;
/// Skills listed per candidate in the templated answer.
pub const FALLBACK_SKILLS: usize = 4;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Answer {
    pub text: String,
    pub candidates: Vec<Profile>,
    /// False when the templated fallback was used.
    pub generated: bool,
}

/// User turn sent to the generator: the query plus the candidates as JSON.
pub fn user_message(query: &str, candidates: &[Profile]) -> serde_json::Result<String> {
    let json = serde_json::to_string_pretty(candidates)?;
    Ok(format!("User query: {query}\n\nCandidates JSON:\n{json}"))
}

/// Compose an answer, sending at most `limit` candidates to the generator
/// and falling back to the template on any generator failure. The returned
/// answer still carries every candidate.
pub fn compose<G: Generator + ?Sized>(
    generator: &G,
    query: &str,
    candidates: Vec<Profile>,
    limit: usize,
) -> Answer {
    let shown = &candidates[..limit.min(candidates.len())];
    let generated = user_message(query, shown)
        .map_err(|err| warn!(error = %err, "could not serialize candidates"))
        .ok()
        .and_then(|message| match generator.generate(SYSTEM_PROMPT, &message) {
            Ok(text) => Some(text),
            Err(err) => {
                warn!(error = %err, "generation provider unavailable; using templated answer");
                None
            }
        });

    match generated {
        Some(text) => {
            debug!(candidates = candidates.len(), "generated answer");
            Answer {
                text,
                candidates,
                generated: true,
            }
        }
        None => Answer {
            text: fallback_answer(&candidates),
            candidates,
            generated: false,
        },
    }
}

/// Deterministic recommendation built from the first three candidates.
pub fn fallback_answer(candidates: &[Profile]) -> String {
    if candidates.is_empty() {
        return NO_MATCHES.to_string();
    }
    let bullets = candidates
        .iter()
        .take(FALLBACK_CANDIDATES)
        .map(bullet)
        .collect::<Vec<_>>()
        .join("\n");
    format!("{LEAD_IN}\n\n{bullets}\n\n{CLOSING}")
}

fn bullet(candidate: &Profile) -> String {
    let notable = candidate.projects.first().map_or("—", String::as_str);
    let skills = candidate
        .skills
        .iter()
        .take(FALLBACK_SKILLS)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join(", ");
    format!(
        "• {} — {}, {} yrs. Notable: {notable}. Skills: {skills}. Availability: {}.",
        candidate.name, candidate.title, candidate.experience_years, candidate.availability
    )
}
