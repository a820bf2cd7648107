//! Source and notifier test utilities

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use tempfile::TempDir;

use storewatch::error::{NotifyError, SourceError};
use storewatch::notifier::{Announcement, Notifier};
use storewatch::snapshot::SnapshotStore;
use storewatch::source::{Observation, SourceKind, VersionSource};
use storewatch::target::{Region, Store};
use storewatch::version::dotted::VersionString;

/// Source returning a fixed version per region; unknown regions fail like a dead network
pub struct FakeSource {
    store: Store,
    versions: Mutex<HashMap<Region, String>>,
}

impl FakeSource {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            versions: Mutex::new(HashMap::new()),
        }
    }

    pub fn with_version(self, region: Region, version: &str) -> Self {
        self.set_version(region, version);
        self
    }

    /// Change what the store publishes between runs
    pub fn set_version(&self, region: Region, version: &str) {
        self.versions
            .lock()
            .unwrap()
            .insert(region, version.to_string());
    }
}

#[async_trait]
impl VersionSource for FakeSource {
    fn store(&self) -> Store {
        self.store
    }

    async fn observe(&self, region: Region) -> Result<Observation, SourceError> {
        let versions = self.versions.lock().unwrap();
        match versions.get(&region) {
            Some(version) => Ok(Observation {
                region,
                store: self.store,
                version: VersionString::parse(version).unwrap(),
                source: SourceKind::Api,
            }),
            None => Err(SourceError::InvalidResponse(
                "Unexpected status: 503 Service Unavailable".to_string(),
            )),
        }
    }
}

/// Notifier that keeps every announcement it is asked to send
#[derive(Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Announcement>>,
    fail: bool,
}

impl RecordingNotifier {
    /// A notifier whose deliveries are all rejected, after recording them
    pub fn failing() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: true,
        }
    }

    pub fn contents(&self) -> Vec<String> {
        self.sent
            .lock()
            .unwrap()
            .iter()
            .map(|a| a.content.clone())
            .collect()
    }
}

#[async_trait]
impl Notifier for RecordingNotifier {
    async fn announce(&self, announcement: &Announcement) -> Result<(), NotifyError> {
        self.sent.lock().unwrap().push(announcement.clone());
        if self.fail {
            return Err(NotifyError::Rejected(reqwest::StatusCode::INTERNAL_SERVER_ERROR));
        }
        Ok(())
    }
}

/// Snapshot store backed by a fresh temporary directory
pub fn create_test_store() -> (TempDir, SnapshotStore) {
    let temp_dir = TempDir::new().unwrap();
    let store = SnapshotStore::new(temp_dir.path().join("current_ver.json"));
    (temp_dir, store)
}
