//! Source trait for observing the published version of a store listing

#[cfg(test)]
use mockall::automock;

use crate::error::SourceError;
use crate::target::{Region, Store};
use crate::version::dotted::VersionString;

/// Where an observed version came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    /// Structured metadata endpoint
    Api,
    /// Scraped storefront page
    Page,
    /// Floor version used after a failed scrape
    Fallback,
}

/// The authoritative version seen for one (region, store) target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub region: Region,
    pub store: Store,
    pub version: VersionString,
    pub source: SourceKind,
}

/// Trait for observing the latest published version on a store
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait VersionSource: Send + Sync {
    /// Returns the store this implementation observes
    fn store(&self) -> Store;

    /// Observes the currently published version for a region
    ///
    /// # Returns
    /// * `Ok(Observation)` - The version to compare against the snapshot
    /// * `Err(SourceError)` - If the version could not be determined at all
    async fn observe(&self, region: Region) -> Result<Observation, SourceError>;
}
