//! Persistent anonymous install identity.
//!
//! Stored in `~/.coinrailz/install_id` as `mcp-` followed by 16 hex chars.
//! Used for demo-key requests and telemetry.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use directories::BaseDirs;
use tracing::{debug, warn};
use uuid::Uuid;

const CONFIG_DIR: &str = ".coinrailz";
const INSTALL_FILE: &str = "install_id";
const PREFIX: &str = "mcp-";

/// Generate a fresh install id.
pub fn generate() -> String {
    let hex = Uuid::new_v4().simple().to_string();
    format!("{}{}", PREFIX, &hex[..16])
}

/// Default location of the install id file, if a home directory exists.
pub fn default_path() -> Option<PathBuf> {
    BaseDirs::new().map(|dirs| dirs.home_dir().join(CONFIG_DIR).join(INSTALL_FILE))
}

/// Read the install id at `path`, creating it on first use.
pub fn load_or_create(path: &Path) -> io::Result<String> {
    if let Ok(existing) = fs::read_to_string(path) {
        let existing = existing.trim();
        if !existing.is_empty() {
            return Ok(existing.to_string());
        }
    }

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let id = generate();
    fs::write(path, &id)?;
    debug!(path = %path.display(), "Created install id");
    Ok(id)
}

/// Resolve the install id for this process.
///
/// Falls back to an in-memory id when the home directory is missing or
/// the file can't be read or written.
pub fn resolve() -> String {
    let Some(path) = default_path() else {
        warn!("No home directory found, using an ephemeral install id");
        return generate();
    };

    load_or_create(&path).unwrap_or_else(|e| {
        warn!(path = %path.display(), error = %e, "Install id not persisted");
        generate()
    })
}
