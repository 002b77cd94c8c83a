//! Error types for roster.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RosterError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("missing config: {0}")]
    MissingConfig(String),

    /// Embedding or generation provider could not be reached or refused the call.
    #[error("provider unavailable: {0}")]
    ProviderUnavailable(String),

    /// Provider answered, but with a body we cannot use.
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// Ingestion input that could not be turned into profiles.
    #[error("{0}")]
    InvalidInput(String),

    #[error("{0}")]
    UnsupportedFormat(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("validation failed: {0}")]
    ValidationFailed(String),
}

impl RosterError {
    /// Stable machine-readable code used in robot output.
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "io_error",
            Self::Json(_) | Self::Serialization(_) => "serialization_error",
            Self::Config(_) | Self::MissingConfig(_) => "config_error",
            Self::InvalidInput(_) => "invalid_input",
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::ProviderUnavailable(_) | Self::MalformedResponse(_) => "provider_unavailable",
            Self::ValidationFailed(_) => "validation_failed",
        }
    }
}

pub type Result<T> = std::result::Result<T, RosterError>;
