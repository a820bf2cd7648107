//! Google Play details page scraper

use std::sync::LazyLock;

use scraper::Selector;
use tracing::{debug, warn};

use crate::config::FLOOR_VERSION;
use crate::error::SourceError;
use crate::source::{Observation, SourceKind, VersionSource};
use crate::sources::storefront::{fetch_page, select_text, strip_version_label};
use crate::target::{Region, Store};
use crate::version::dotted::VersionString;

/// Default base URL for Google Play
pub const DEFAULT_BASE_URL: &str = "https://play.google.com";

/// Position of the "Current version" value on the details page
const VERSION_SELECTOR: &str = "html > body > div:nth-of-type(1) > div:nth-of-type(4) > c-wiz \
    > div > div:nth-of-type(2) > div > div > main > c-wiz:nth-of-type(4) \
    > div:nth-of-type(1) > div:nth-of-type(2) > div > div:nth-of-type(4) > span > div > span";

static VERSION: LazyLock<Selector> = LazyLock::new(|| Selector::parse(VERSION_SELECTOR).unwrap());

/// Source implementation for Google Play
///
/// The page is the only signal, so it is authoritative as-is. Any failure
/// to fetch or read it yields [`FLOOR_VERSION`], which never announces.
pub struct PlayStoreSource {
    client: reqwest::Client,
    base_url: String,
}

impl PlayStoreSource {
    /// Creates a new PlayStoreSource with a custom base URL
    pub fn new(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: base_url.to_string(),
        }
    }

    fn page_url(&self, region: Region) -> String {
        format!(
            "{}/store/apps/details?id={}",
            self.base_url,
            region.bundle_id()
        )
    }

    async fn scrape(&self, region: Region) -> Result<Option<VersionString>, SourceError> {
        let html = fetch_page(&self.client, &self.page_url(region)).await?;
        Ok(select_text(&html, &VERSION)
            .and_then(|text| strip_version_label(&text))
            .and_then(|raw| VersionString::parse(&raw)))
    }

    fn floor(region: Region) -> Observation {
        Observation {
            region,
            store: Store::PlayStore,
            version: VersionString::parse(FLOOR_VERSION).expect("floor version is numeric"),
            source: SourceKind::Fallback,
        }
    }
}

#[async_trait::async_trait]
impl VersionSource for PlayStoreSource {
    fn store(&self) -> Store {
        Store::PlayStore
    }

    async fn observe(&self, region: Region) -> Result<Observation, SourceError> {
        match self.scrape(region).await {
            Ok(Some(version)) => {
                debug!("{} Play Store page reports {}", region, version);
                Ok(Observation {
                    region,
                    store: Store::PlayStore,
                    version,
                    source: SourceKind::Page,
                })
            }
            Ok(None) => {
                warn!(
                    "No version found on {} Play Store page, using {}",
                    region, FLOOR_VERSION
                );
                Ok(Self::floor(region))
            }
            Err(e) => {
                warn!(
                    "Failed to scrape {} Play Store page, using {}: {}",
                    region, FLOOR_VERSION, e
                );
                Ok(Self::floor(region))
            }
        }
    }
}
