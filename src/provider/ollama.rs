//! Ollama-compatible HTTP provider.
//!
//! - `POST /api/embed`  `{model, input: [..]}` -> `{embeddings: [[..]..]}`
//! - `POST /api/chat`   `{model, messages, stream: false}` -> `{message: {content}}`
//! - `GET  /api/tags`   reachability probe

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::{Result, RosterError};
use crate::provider::{Embedder, Generator, HealthProbe, Provider, validate_embeddings};

pub struct OllamaClient {
    base_url: String,
    embed_model: String,
    llm_model: String,
    temperature: f32,
    embed_http: reqwest::blocking::Client,
    chat_http: reqwest::blocking::Client,
    health_http: reqwest::blocking::Client,
}

#[derive(Debug, Serialize)]
struct EmbedRequest<'a> {
    model: &'a str,
    input: &'a [String],
}

#[derive(Debug, Deserialize)]
struct EmbedResponse {
    #[serde(default)]
    embeddings: Option<Vec<Vec<f32>>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
struct ChatOptions {
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    options: ChatOptions,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    message: Option<ChatResponseMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: String,
}

impl OllamaClient {
    pub fn from_config(config: &ProviderConfig) -> Result<Self> {
        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            embed_model: config.embed_model.clone(),
            llm_model: config.llm_model.clone(),
            temperature: config.temperature,
            embed_http: http_client(config.embed_timeout_secs)?,
            chat_http: http_client(config.chat_timeout_secs)?,
            health_http: http_client(config.health_timeout_secs)?,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

fn http_client(timeout_secs: u64) -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(Duration::from_secs(timeout_secs.max(1)))
        .build()
        .map_err(|err| RosterError::Config(format!("provider http client: {err}")))
}

impl Embedder for OllamaClient {
    fn embed(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let request = EmbedRequest {
            model: &self.embed_model,
            input: texts,
        };
        let response = self
            .embed_http
            .post(self.url("/api/embed"))
            .json(&request)
            .send()
            .map_err(|err| RosterError::ProviderUnavailable(format!("embed request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(RosterError::ProviderUnavailable(format!(
                "embed HTTP {}",
                response.status()
            )));
        }

        let body: EmbedResponse = response
            .json()
            .map_err(|err| RosterError::MalformedResponse(format!("embed response parse: {err}")))?;
        let vectors = body.embeddings.ok_or_else(|| {
            RosterError::MalformedResponse("embed response has no embeddings".to_string())
        })?;

        debug!(inputs = texts.len(), returned = vectors.len(), "embeddings received");
        validate_embeddings(vectors, texts.len())
    }
}

impl Generator for OllamaClient {
    fn generate(&self, system: &str, user: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.llm_model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            stream: false,
            options: ChatOptions {
                temperature: self.temperature,
            },
        };
        let response = self
            .chat_http
            .post(self.url("/api/chat"))
            .json(&request)
            .send()
            .map_err(|err| RosterError::ProviderUnavailable(format!("chat request failed: {err}")))?;

        if !response.status().is_success() {
            return Err(RosterError::ProviderUnavailable(format!(
                "chat HTTP {}",
                response.status()
            )));
        }

        let body: ChatResponse = response
            .json()
            .map_err(|err| RosterError::MalformedResponse(format!("chat response parse: {err}")))?;
        let content = body.message.map(|m| m.content).unwrap_or_default();
        if content.trim().is_empty() {
            return Err(RosterError::MalformedResponse(
                "chat response has no content".to_string(),
            ));
        }
        Ok(content)
    }
}

impl HealthProbe for OllamaClient {
    fn is_healthy(&self) -> bool {
        self.health_http
            .get(self.url("/api/tags"))
            .send()
            .map(|response| response.status().is_success())
            .unwrap_or(false)
    }
}

impl Provider for OllamaClient {
    fn name(&self) -> &str {
        "ollama"
    }
}
