//! Profile snapshot on disk and raw upload archive.

use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::Profile;
use crate::error::{Result, RosterError};
use crate::ingest;

/// Load the bootstrap snapshot. A missing file is an empty roster.
pub fn load_snapshot(path: &Path) -> Result<Vec<Profile>> {
    if !path.exists() {
        info!(path = %path.display(), "no profile snapshot found; starting empty");
        return Ok(Vec::new());
    }
    let raw = std::fs::read_to_string(path)?;
    let profiles = ingest::json::parse(&raw).map_err(|err| {
        RosterError::InvalidInput(format!("snapshot {}: {err}", path.display()))
    })?;
    debug!(path = %path.display(), profiles = profiles.len(), "snapshot loaded");
    Ok(profiles)
}

/// Write the whole collection atomically (temp file in the same directory, then rename).
pub fn save_snapshot(path: &Path, profiles: &[Profile]) -> Result<()> {
    let dir = path
        .parent()
        .filter(|parent| !parent.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    std::fs::create_dir_all(dir)?;

    let json = serde_json::to_string_pretty(profiles)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(json.as_bytes())?;
    tmp.write_all(b"\n")?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).map_err(|err| RosterError::Io(err.error))?;

    debug!(path = %path.display(), profiles = profiles.len(), "snapshot written");
    Ok(())
}

/// Keep a copy of a raw upload as `{unix_ts}_{uuid}_{filename}` under `upload_dir`.
pub fn archive_upload(upload_dir: &Path, filename: &str, raw: &[u8]) -> Result<PathBuf> {
    std::fs::create_dir_all(upload_dir)?;
    let stored = format!(
        "{}_{}_{}",
        chrono::Utc::now().timestamp(),
        Uuid::new_v4().simple(),
        sanitize_filename(filename)
    );
    let dest = upload_dir.join(stored);
    std::fs::write(&dest, raw)?;
    debug!(path = %dest.display(), bytes = raw.len(), "upload archived");
    Ok(dest)
}

fn sanitize_filename(filename: &str) -> String {
    let name = Path::new(filename)
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload");
    name.chars()
        .map(|c| if c.is_control() { '_' } else { c })
        .collect()
}
