//! Watches the App Store and Google Play listings of an app in several
//! regions and announces each newly published version to a chat webhook.
//!
//! One invocation is one check: the snapshot of last announced versions is
//! loaded, every target is observed once, updates are announced, and the
//! snapshot is written back.

pub mod config;
pub mod error;
pub mod logging;
pub mod notifier;
pub mod snapshot;
pub mod source;
pub mod sources;
pub mod target;
pub mod version;
pub mod watcher;

use std::sync::Arc;

use tracing::info;

use crate::config::{WatchConfig, home_dir};
use crate::error::SnapshotError;
use crate::notifier::WebhookNotifier;
use crate::snapshot::SnapshotStore;
use crate::sources::app_store::{DEFAULT_API_BASE_URL, DEFAULT_PAGE_BASE_URL};
use crate::sources::play_store::DEFAULT_BASE_URL as PLAY_STORE_BASE_URL;
use crate::sources::storefront::http_client;
use crate::sources::{AppStoreSource, PlayStoreSource};
use crate::target::Target;
use crate::watcher::{RunReport, Watcher};

/// Perform one full check using the working directory's files
pub async fn run() -> anyhow::Result<()> {
    let home = home_dir();
    let _guard = logging::init(&home);

    let config = WatchConfig::load(&home)?;
    let webhook_url = config.read_webhook_url(&home)?;
    let client = http_client(config.fetch_timeout());

    let watcher = Watcher::new(
        Target::all(),
        Arc::new(WebhookNotifier::new(&webhook_url, client.clone())),
    )
    .with_source(Arc::new(PlayStoreSource::new(
        PLAY_STORE_BASE_URL,
        client.clone(),
    )))
    .with_source(Arc::new(AppStoreSource::new(
        DEFAULT_API_BASE_URL,
        DEFAULT_PAGE_BASE_URL,
        client,
    )));

    let store = SnapshotStore::new(config.snapshot_path(&home));
    let report = check_once(&watcher, &store).await?;

    info!(
        "Run complete: {} announced, {} unchanged, {} failed",
        report.announced.len(),
        report.unchanged.len(),
        report.failed.len()
    );
    Ok(())
}

/// Load the snapshot, run every target once and save the snapshot exactly once
pub async fn check_once(
    watcher: &Watcher,
    store: &SnapshotStore,
) -> Result<RunReport, SnapshotError> {
    let mut snapshot = store.load(watcher.targets())?;
    let report = watcher.run(&mut snapshot).await;
    store.save(&snapshot)?;
    Ok(report)
}
