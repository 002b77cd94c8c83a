//! Ingestion of profile uploads
//!
//! Validation happens here and only here: everything past this boundary
//! works with typed [`Profile`] records.

use std::path::Path;

use serde::Serialize;

use crate::core::Profile;
use crate::error::{Result, RosterError};

pub mod delimited;
pub mod json;

/// Outcome of an upsert batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    /// Records in the batch, replacements included.
    pub added: usize,
    /// Collection size after the upsert.
    pub total: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadFormat {
    Json,
    Csv,
}

impl UploadFormat {
    /// Detect by file extension, case-insensitively.
    pub fn from_path(path: &Path) -> Result<Self> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Ok(Self::Json),
            Some("csv") => Ok(Self::Csv),
            _ => Err(RosterError::UnsupportedFormat(
                "Unsupported file type. Use .json or .csv".to_string(),
            )),
        }
    }
}

/// Parse raw upload bytes into profiles.
pub fn parse(format: UploadFormat, raw: &[u8]) -> Result<Vec<Profile>> {
    let text = std::str::from_utf8(raw)
        .map_err(|err| RosterError::InvalidInput(format!("Failed to parse: {err}")))?;
    match format {
        UploadFormat::Json => json::parse(text),
        UploadFormat::Csv => delimited::parse(text),
    }
}

/// Read and parse an upload file.
pub fn parse_file(path: &Path) -> Result<Vec<Profile>> {
    let format = UploadFormat::from_path(path)?;
    let raw = std::fs::read(path)?;
    parse(format, &raw)
}
