//! Storage layer for roster
//!
//! The in-memory store is authoritative; disk holds a JSON snapshot mirror
//! of the collection and an archive of raw uploads.

pub mod snapshot;

pub use snapshot::{archive_upload, load_snapshot, save_snapshot};
