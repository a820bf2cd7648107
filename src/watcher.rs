//! Run orchestration: observe every target, announce updates, advance the snapshot

use std::collections::HashMap;
use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::notifier::{Announcement, Notifier};
use crate::snapshot::Snapshot;
use crate::source::VersionSource;
use crate::target::{Store, Target};
use crate::version::checker::is_update;
use crate::version::dotted::VersionString;

/// What happened to each target during one run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunReport {
    /// Targets announced, with the version now recorded
    pub announced: Vec<(Target, VersionString)>,
    /// Targets observed at or behind the snapshot
    pub unchanged: Vec<Target>,
    /// Targets whose version could not be observed
    pub failed: Vec<Target>,
}

pub struct Watcher {
    targets: Vec<Target>,
    sources: HashMap<Store, Arc<dyn VersionSource>>,
    notifier: Arc<dyn Notifier>,
}

impl Watcher {
    pub fn new(targets: Vec<Target>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            targets,
            sources: HashMap::new(),
            notifier,
        }
    }

    /// Register the source for the store it reports in [`VersionSource::store`]
    pub fn with_source(mut self, source: Arc<dyn VersionSource>) -> Self {
        self.sources.insert(source.store(), source);
        self
    }

    pub fn targets(&self) -> &[Target] {
        &self.targets
    }

    /// Check every target once, in order.
    ///
    /// A failing target is logged and skipped; its snapshot entry is left
    /// as it was. The snapshot only ever moves forward: an announced target
    /// is recorded even if the webhook delivery failed.
    pub async fn run(&self, snapshot: &mut Snapshot) -> RunReport {
        let mut report = RunReport::default();

        for target in &self.targets {
            let Some(source) = self.sources.get(&target.store) else {
                error!("No source registered for {}", target);
                report.failed.push(*target);
                continue;
            };

            let observation = match source.observe(target.region).await {
                Ok(observation) => observation,
                Err(e) => {
                    error!("Failed to observe {}: {}", target, e);
                    report.failed.push(*target);
                    continue;
                }
            };

            let last_known = snapshot.last_known(target.region, target.store);
            debug!(
                "{}: observed {} ({:?}), last known {}",
                target, observation.version, observation.source, last_known
            );

            if !is_update(observation.version.as_str(), last_known) {
                report.unchanged.push(*target);
                continue;
            }

            let announcement =
                Announcement::new(target.region, target.store, &observation.version);
            info!("{}", announcement.content);
            if let Err(e) = self.notifier.announce(&announcement).await {
                warn!("Failed to announce {}: {}", target, e);
            }

            snapshot.set(target.region, target.store, observation.version.as_str());
            report.announced.push((*target, observation.version));
        }

        report
    }
}
