//! Last announced version per (region, store), persisted as pretty JSON
//!
//! ```json
//! {
//!   "NA": {
//!     "Play Store": "2.71.0",
//!     "App Store": "2.71.0"
//!   },
//!   "JP": { ... }
//! }
//! ```

use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use tracing::{debug, info};

use crate::config::FLOOR_VERSION;
use crate::error::SnapshotError;
use crate::target::{Region, Store, Target};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    entries: BTreeMap<Region, BTreeMap<Store, String>>,
}

impl Snapshot {
    /// Snapshot with every target at [`FLOOR_VERSION`]
    pub fn with_floor(targets: &[Target]) -> Self {
        let mut snapshot = Self::default();
        for target in targets {
            snapshot.set(target.region, target.store, FLOOR_VERSION);
        }
        snapshot
    }

    pub fn get(&self, region: Region, store: Store) -> Option<&str> {
        self.entries
            .get(&region)
            .and_then(|stores| stores.get(&store))
            .map(String::as_str)
    }

    /// Last announced version, or the floor for a target never recorded
    pub fn last_known(&self, region: Region, store: Store) -> &str {
        self.get(region, store).unwrap_or(FLOOR_VERSION)
    }

    pub fn set(&mut self, region: Region, store: Store, version: impl Into<String>) {
        self.entries
            .entry(region)
            .or_default()
            .insert(store, version.into());
    }
}

/// Reads and replaces the snapshot file
pub struct SnapshotStore {
    path: PathBuf,
}

impl SnapshotStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the snapshot.
    ///
    /// A missing or empty file is a cold start, not an error: every target
    /// starts at the floor version so the first run announces each of them
    /// once. Malformed JSON is still an error.
    pub fn load(&self, targets: &[Target]) -> Result<Snapshot, SnapshotError> {
        if !self.path.exists() {
            info!(
                "No snapshot at {:?}, starting every target at {}",
                self.path, FLOOR_VERSION
            );
            return Ok(Snapshot::with_floor(targets));
        }

        let content = std::fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            info!(
                "Empty snapshot at {:?}, starting every target at {}",
                self.path, FLOOR_VERSION
            );
            return Ok(Snapshot::with_floor(targets));
        }

        let snapshot: Snapshot = serde_json::from_str(&content)?;
        debug!("Loaded snapshot from {:?}", self.path);
        Ok(snapshot)
    }

    /// Replace the snapshot file wholesale.
    ///
    /// Writes to a temporary file in the same directory and renames it over
    /// the previous snapshot, so an interrupted write keeps the old state.
    pub fn save(&self, snapshot: &Snapshot) -> Result<(), SnapshotError> {
        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        std::fs::create_dir_all(&dir)?;

        let mut file = NamedTempFile::new_in(&dir)?;
        serde_json::to_writer_pretty(&mut file, snapshot)?;
        file.write_all(b"\n")?;
        file.as_file().sync_all()?;
        file.persist(&self.path)?;

        info!("Saved snapshot to {:?}", self.path);
        Ok(())
    }
}
