//! External model providers
//!
//! The engine only sees these traits. Any `Err` from them is treated as
//! "provider unavailable" and routed to the matching fallback path.

use std::sync::Arc;

use crate::config::ProviderConfig;
use crate::error::{Result, RosterError};

pub mod ollama;

pub use ollama::OllamaClient;

/// Turns texts into fixed-dimension vectors.
pub trait Embedder: Send + Sync {
    /// Embed `texts` in order. Implementations must return exactly one vector
    /// per input, all of the same non-zero dimension, or an error.
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Single-item convenience used for queries.
    fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let mut vectors = self.embed(&[text.to_string()])?;
        match (vectors.pop(), vectors.is_empty()) {
            (Some(vector), true) => Ok(vector),
            _ => Err(RosterError::MalformedResponse(
                "expected exactly one query embedding".to_string(),
            )),
        }
    }
}

/// Produces prose from a system instruction and a user message.
pub trait Generator: Send + Sync {
    fn generate(&self, system: &str, user: &str) -> Result<String>;
}

/// Cheap reachability check.
pub trait HealthProbe: Send + Sync {
    fn is_healthy(&self) -> bool;
}

/// Everything the engine needs from a model backend.
pub trait Provider: Embedder + Generator + HealthProbe {
    fn name(&self) -> &str;
}

/// Provider that is never reachable. Forces every fallback path.
#[derive(Debug, Clone, Copy, Default)]
pub struct Offline;

impl Embedder for Offline {
    fn embed(&self, _texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Err(RosterError::ProviderUnavailable(
            "provider disabled (offline mode)".to_string(),
        ))
    }
}

impl Generator for Offline {
    fn generate(&self, _system: &str, _user: &str) -> Result<String> {
        Err(RosterError::ProviderUnavailable(
            "provider disabled (offline mode)".to_string(),
        ))
    }
}

impl HealthProbe for Offline {
    fn is_healthy(&self) -> bool {
        false
    }
}

impl Provider for Offline {
    fn name(&self) -> &str {
        "offline"
    }
}

/// Build the provider described by `config`.
pub fn from_config(config: &ProviderConfig) -> Result<Arc<dyn Provider>> {
    if !config.enabled {
        return Ok(Arc::new(Offline));
    }
    Ok(Arc::new(OllamaClient::from_config(config)?))
}

/// Check a batch embedding response against the request size.
///
/// Rejects count mismatches, empty vectors and mixed dimensions.
pub fn validate_embeddings(vectors: Vec<Vec<f32>>, expected: usize) -> Result<Vec<Vec<f32>>> {
    if vectors.len() != expected {
        return Err(RosterError::MalformedResponse(format!(
            "expected {expected} embeddings, got {}",
            vectors.len()
        )));
    }
    let Some(dim) = vectors.first().map(Vec::len) else {
        return Ok(vectors);
    };
    if dim == 0 {
        return Err(RosterError::MalformedResponse(
            "empty embedding vector".to_string(),
        ));
    }
    if let Some(pos) = vectors.iter().position(|v| v.len() != dim) {
        return Err(RosterError::MalformedResponse(format!(
            "embedding {pos} has dimension {}, expected {dim}",
            vectors[pos].len()
        )));
    }
    Ok(vectors)
}
