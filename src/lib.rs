//! roster - staffing search over employee profiles
//!
//! Ranks a roster of employee profiles against a free-text staffing query and
//! drafts a recommendation. Semantic ranking and prose generation go through an
//! Ollama-compatible provider; both degrade to deterministic, network-free
//! fallbacks (keyword coverage and a templated answer) when it is unavailable.

pub mod answer;
pub mod app;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod ingest;
pub mod provider;
pub mod search;
pub mod storage;
pub mod test_utils;

pub use error::{Result, RosterError};
