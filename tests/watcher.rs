//! End-to-end runs: snapshot file -> watcher -> announcements -> snapshot file

mod helper;

use std::sync::Arc;

use helper::{FakeSource, RecordingNotifier, create_test_store};
use storewatch::check_once;
use storewatch::snapshot::Snapshot;
use storewatch::target::{Region, Store, Target};
use storewatch::watcher::Watcher;

fn app_store_targets() -> Vec<Target> {
    vec![
        Target::new(Region::NorthAmerica, Store::AppStore),
        Target::new(Region::Japan, Store::AppStore),
    ]
}

#[tokio::test]
async fn cold_start_announces_every_target_once() {
    let (_temp_dir, store) = create_test_store();
    let notifier = Arc::new(RecordingNotifier::default());
    let source = FakeSource::new(Store::AppStore)
        .with_version(Region::NorthAmerica, "2.5.0")
        .with_version(Region::Japan, "2.5.0");
    let watcher = Watcher::new(app_store_targets(), notifier.clone()).with_source(Arc::new(source));

    let report = check_once(&watcher, &store).await.unwrap();

    assert_eq!(report.announced.len(), 2);
    assert_eq!(
        notifier.contents(),
        vec![
            "New NA App Store update: v2.5.0".to_string(),
            "New JP App Store update: v2.5.0".to_string(),
        ]
    );

    let mut expected = Snapshot::default();
    expected.set(Region::NorthAmerica, Store::AppStore, "2.5.0");
    expected.set(Region::Japan, Store::AppStore, "2.5.0");
    assert_eq!(store.load(&app_store_targets()).unwrap(), expected);
}

#[tokio::test]
async fn empty_snapshot_file_is_a_cold_start() {
    let (_temp_dir, store) = create_test_store();
    std::fs::write(store.path(), "").unwrap();

    let notifier = Arc::new(RecordingNotifier::default());
    let source = FakeSource::new(Store::AppStore)
        .with_version(Region::NorthAmerica, "2.5.0")
        .with_version(Region::Japan, "2.5.0");
    let watcher = Watcher::new(app_store_targets(), notifier.clone()).with_source(Arc::new(source));

    let report = check_once(&watcher, &store).await.unwrap();

    assert_eq!(report.announced.len(), 2);
    assert_eq!(notifier.contents().len(), 2);
    let saved = store.load(&[]).unwrap();
    assert_eq!(saved.get(Region::NorthAmerica, Store::AppStore), Some("2.5.0"));
    assert_eq!(saved.get(Region::Japan, Store::AppStore), Some("2.5.0"));
}

#[tokio::test]
async fn unchanged_version_announces_nothing() {
    let (_temp_dir, store) = create_test_store();
    let mut previous = Snapshot::default();
    previous.set(Region::NorthAmerica, Store::AppStore, "2.5.0");
    store.save(&previous).unwrap();
    let before = std::fs::read_to_string(store.path()).unwrap();

    let notifier = Arc::new(RecordingNotifier::default());
    let source = FakeSource::new(Store::AppStore).with_version(Region::NorthAmerica, "2.5.0");
    let watcher = Watcher::new(
        vec![Target::new(Region::NorthAmerica, Store::AppStore)],
        notifier.clone(),
    )
    .with_source(Arc::new(source));

    let report = check_once(&watcher, &store).await.unwrap();

    assert!(report.announced.is_empty());
    assert!(notifier.contents().is_empty());
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), before);
}

#[tokio::test]
async fn lower_version_does_not_downgrade_snapshot() {
    let (_temp_dir, store) = create_test_store();
    let mut previous = Snapshot::default();
    previous.set(Region::Japan, Store::AppStore, "2.80.1");
    store.save(&previous).unwrap();

    let notifier = Arc::new(RecordingNotifier::default());
    let source = FakeSource::new(Store::AppStore).with_version(Region::Japan, "2.79.0");
    let watcher = Watcher::new(
        vec![Target::new(Region::Japan, Store::AppStore)],
        notifier.clone(),
    )
    .with_source(Arc::new(source));

    check_once(&watcher, &store).await.unwrap();

    assert!(notifier.contents().is_empty());
    assert_eq!(store.load(&[]).unwrap(), previous);
}

#[tokio::test]
async fn failing_target_does_not_block_the_others() {
    let (_temp_dir, store) = create_test_store();
    let notifier = Arc::new(RecordingNotifier::default());
    // NA has no version configured, so observing it fails
    let source = FakeSource::new(Store::AppStore).with_version(Region::Japan, "2.80.1");
    let watcher = Watcher::new(app_store_targets(), notifier.clone()).with_source(Arc::new(source));

    let report = check_once(&watcher, &store).await.unwrap();

    assert_eq!(
        report.failed,
        vec![Target::new(Region::NorthAmerica, Store::AppStore)]
    );
    assert_eq!(
        notifier.contents(),
        vec!["New JP App Store update: v2.80.1".to_string()]
    );

    let saved = store.load(&app_store_targets()).unwrap();
    assert_eq!(saved.get(Region::Japan, Store::AppStore), Some("2.80.1"));
    assert_eq!(saved.get(Region::NorthAmerica, Store::AppStore), Some("2.0.0"));
}

#[tokio::test]
async fn second_run_without_release_is_silent() {
    let (_temp_dir, store) = create_test_store();
    let notifier = Arc::new(RecordingNotifier::default());
    let source = FakeSource::new(Store::AppStore)
        .with_version(Region::NorthAmerica, "2.71.0")
        .with_version(Region::Japan, "2.80.1");
    let watcher = Watcher::new(app_store_targets(), notifier.clone()).with_source(Arc::new(source));

    check_once(&watcher, &store).await.unwrap();
    let after_first = std::fs::read_to_string(store.path()).unwrap();
    let report = check_once(&watcher, &store).await.unwrap();

    assert!(report.announced.is_empty());
    assert_eq!(notifier.contents().len(), 2);
    assert_eq!(std::fs::read_to_string(store.path()).unwrap(), after_first);
}

#[tokio::test]
async fn new_release_between_runs_is_announced_once() {
    let (_temp_dir, store) = create_test_store();
    let notifier = Arc::new(RecordingNotifier::default());
    let source = Arc::new(FakeSource::new(Store::AppStore).with_version(Region::NorthAmerica, "2.71.0"));
    let watcher = Watcher::new(
        vec![Target::new(Region::NorthAmerica, Store::AppStore)],
        notifier.clone(),
    )
    .with_source(source.clone());

    check_once(&watcher, &store).await.unwrap();
    source.set_version(Region::NorthAmerica, "2.72.0");
    check_once(&watcher, &store).await.unwrap();
    check_once(&watcher, &store).await.unwrap();

    assert_eq!(
        notifier.contents(),
        vec![
            "New NA App Store update: v2.71.0".to_string(),
            "New NA App Store update: v2.72.0".to_string(),
        ]
    );
}

#[tokio::test]
async fn failed_delivery_still_advances_snapshot() {
    let (_temp_dir, store) = create_test_store();
    let notifier = Arc::new(RecordingNotifier::failing());
    let source = FakeSource::new(Store::AppStore).with_version(Region::NorthAmerica, "2.71.0");
    let watcher = Watcher::new(
        vec![Target::new(Region::NorthAmerica, Store::AppStore)],
        notifier.clone(),
    )
    .with_source(Arc::new(source));

    check_once(&watcher, &store).await.unwrap();
    check_once(&watcher, &store).await.unwrap();

    // Announced once and never retried
    assert_eq!(notifier.contents().len(), 1);
    assert_eq!(
        store.load(&[]).unwrap().get(Region::NorthAmerica, Store::AppStore),
        Some("2.71.0")
    );
}

#[tokio::test]
async fn play_store_floor_fallback_never_announces() {
    let (_temp_dir, store) = create_test_store();
    let notifier = Arc::new(RecordingNotifier::default());
    // A failed Play Store scrape reports the floor version
    let play = FakeSource::new(Store::PlayStore)
        .with_version(Region::NorthAmerica, "2.0.0")
        .with_version(Region::Japan, "2.0.0");
    let app = FakeSource::new(Store::AppStore)
        .with_version(Region::NorthAmerica, "2.71.0")
        .with_version(Region::Japan, "2.80.1");
    let watcher = Watcher::new(Target::all(), notifier.clone())
        .with_source(Arc::new(play))
        .with_source(Arc::new(app));

    let report = check_once(&watcher, &store).await.unwrap();

    assert_eq!(report.announced.len(), 2);
    assert_eq!(report.unchanged.len(), 2);
    let saved = store.load(&[]).unwrap();
    assert_eq!(saved.get(Region::NorthAmerica, Store::PlayStore), Some("2.0.0"));
    assert_eq!(saved.get(Region::Japan, Store::AppStore), Some("2.80.1"));
}
