//! Point-in-time copy of all three collections, for export and import.
//!
//! Snapshots are written as pretty JSON, or as MessagePack when the file
//! extension is `.msgpack` or `.mpk`.

use crate::entities::{Activity, Contact, Deal};
use crate::error::Result;
use crate::store::ensure_unique;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::debug;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub contacts: Vec<Contact>,
    #[serde(default)]
    pub deals: Vec<Deal>,
    #[serde(default)]
    pub activities: Vec<Activity>,
    pub exported_at: DateTime<Utc>,
}

/// On-disk encoding, chosen from the file extension.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SnapshotFormat {
    Json,
    MessagePack,
}

impl SnapshotFormat {
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("msgpack") || ext.eq_ignore_ascii_case("mpk") => {
                SnapshotFormat::MessagePack
            }
            _ => SnapshotFormat::Json,
        }
    }
}

impl Snapshot {
    pub fn new(contacts: Vec<Contact>, deals: Vec<Deal>, activities: Vec<Activity>) -> Self {
        Self {
            contacts,
            deals,
            activities,
            exported_at: Utc::now(),
        }
    }

    pub fn empty() -> Self {
        Self::new(Vec::new(), Vec::new(), Vec::new())
    }

    /// Reject a snapshot in which any collection reuses an identifier.
    pub fn validate(&self) -> Result<()> {
        ensure_unique(&self.contacts)?;
        ensure_unique(&self.deals)?;
        ensure_unique(&self.activities)
    }

    pub fn record_count(&self) -> usize {
        self.contacts.len() + self.deals.len() + self.activities.len()
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_msgpack(&self) -> Result<Vec<u8>> {
        Ok(rmp_serde::to_vec_named(self)?)
    }

    pub fn from_msgpack(bytes: &[u8]) -> Result<Self> {
        Ok(rmp_serde::from_slice(bytes)?)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let bytes = match SnapshotFormat::from_path(path) {
            SnapshotFormat::Json => self.to_json()?.into_bytes(),
            SnapshotFormat::MessagePack => self.to_msgpack()?,
        };
        fs::write(path, bytes)?;
        debug!(path = %path.display(), records = self.record_count(), "snapshot saved");
        Ok(())
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let bytes = fs::read(path)?;
        let snapshot = match SnapshotFormat::from_path(path) {
            SnapshotFormat::Json => serde_json::from_slice(&bytes)?,
            SnapshotFormat::MessagePack => Self::from_msgpack(&bytes)?,
        };
        debug!(path = %path.display(), "snapshot loaded");
        Ok(snapshot)
    }
}
