//! Manifest Loader
//!
//! Reads a manifest file, parses the JSON, and validates its shape.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use crate::types::{AssetEntry, Manifest};

/// Manifest files larger than this are rejected.
pub const MAX_MANIFEST_BYTES: u64 = 1_000_000;

#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    #[error("manifest file not found: {0}")]
    NotFound(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("manifest must be a JSON array of entries")]
    NotAnArray,

    #[error("manifest file too large ({0} bytes, max {max})", max = MAX_MANIFEST_BYTES)]
    TooLarge(u64),
}

/// Parse manifest JSON. The top level must be an array; entry fields are
/// validated later, per entry.
pub fn parse_manifest(content: &str) -> Result<Manifest, ManifestError> {
    let value: serde_json::Value = serde_json::from_str(content)?;
    if !value.is_array() {
        return Err(ManifestError::NotAnArray);
    }
    let entries: Vec<AssetEntry> = serde_json::from_value(value)?;
    Ok(Manifest { entries })
}

/// Load and parse a manifest file.
pub fn load_manifest(path: &Path) -> Result<Manifest, ManifestError> {
    if !path.exists() {
        return Err(ManifestError::NotFound(path.to_path_buf()));
    }

    let metadata = fs::metadata(path)?;
    if metadata.len() > MAX_MANIFEST_BYTES {
        return Err(ManifestError::TooLarge(metadata.len()));
    }

    let content = fs::read_to_string(path)?;
    let manifest = parse_manifest(&content)?;

    info!("Loaded {} manifest entries from {:?}", manifest.len(), path);
    Ok(manifest)
}
