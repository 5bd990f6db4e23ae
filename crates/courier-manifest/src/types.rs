//! Manifest Types
//!
//! Rust structs matching the asset manifest JSON schema.

use serde::{Deserialize, Serialize};

/// One asset to retrieve into the assets directory.
///
/// All fields are optional at parse time so a bad entry is reported and
/// counted instead of failing the whole manifest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_user: Option<String>,
}

/// How an entry's payload reaches the assets directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transfer {
    Local,
    Remote { user: String, host: String },
}

impl AssetEntry {
    /// Extract the required source and destination paths.
    pub fn require_paths(&self) -> Result<(&str, &str), String> {
        let source = match self.source.as_deref() {
            Some(s) if !s.is_empty() => s,
            _ => return Err("missing source".to_string()),
        };
        let destination = match self.destination.as_deref() {
            Some(d) if !d.is_empty() => d,
            _ => return Err("missing destination".to_string()),
        };
        Ok((source, destination))
    }

    /// Classify how this entry is fetched. Remote requires both a host and
    /// a user; anything less falls back to a local copy.
    pub fn transfer(&self) -> Transfer {
        match (self.remote_user.as_deref(), self.remote_host.as_deref()) {
            (Some(user), Some(host)) if !user.is_empty() && !host.is_empty() => {
                Transfer::Remote {
                    user: user.to_string(),
                    host: host.to_string(),
                }
            }
            _ => Transfer::Local,
        }
    }
}

/// A parsed asset manifest: an ordered list of entries.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Manifest {
    pub entries: Vec<AssetEntry>,
}

impl Manifest {
    /// Whether any entry needs the secure copy path.
    pub fn has_remote(&self) -> bool {
        self.entries
            .iter()
            .any(|e| matches!(e.transfer(), Transfer::Remote { .. }))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
