//! Apple App Store: iTunes lookup API plus the storefront page

use std::sync::LazyLock;

use scraper::Selector;
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::SourceError;
use crate::source::{Observation, VersionSource};
use crate::sources::storefront::{fetch_page, select_text, strip_version_label};
use crate::target::{Region, Store};
use crate::version::dotted::VersionString;
use crate::version::reconciler::reconcile;

/// Default base URL for the iTunes lookup API
pub const DEFAULT_API_BASE_URL: &str = "http://itunes.apple.com";

/// Default base URL for the App Store storefront
pub const DEFAULT_PAGE_BASE_URL: &str = "https://apps.apple.com";

static WHATS_NEW_VERSION: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("p.whats-new__latest__version").unwrap());

/// Response from the iTunes lookup API
#[derive(Debug, Deserialize)]
struct LookupResponse {
    results: Vec<LookupResult>,
}

#[derive(Debug, Deserialize)]
struct LookupResult {
    version: String,
}

/// Source implementation for the App Store
///
/// Queries the lookup API first; its failures propagate. The storefront
/// page is then scraped and reconciled against the API version, with any
/// page failure falling back to the API.
pub struct AppStoreSource {
    client: reqwest::Client,
    api_base_url: String,
    page_base_url: String,
}

impl AppStoreSource {
    /// Creates a new AppStoreSource with custom base URLs
    pub fn new(api_base_url: &str, page_base_url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            api_base_url: api_base_url.to_string(),
            page_base_url: page_base_url.to_string(),
        }
    }

    fn lookup_url(&self, region: Region) -> String {
        format!(
            "{}/lookup?bundleId={}&country={}",
            self.api_base_url,
            region.bundle_id(),
            region.country()
        )
    }

    fn page_url(&self, region: Region) -> String {
        format!(
            "{}/{}/app/id{}",
            self.page_base_url,
            region.country(),
            region.app_store_id()
        )
    }

    /// Version reported by the lookup API
    pub async fn fetch_api_version(&self, region: Region) -> Result<VersionString, SourceError> {
        let url = self.lookup_url(region);

        let response = self.client.get(&url).send().await?;

        let status = response.status();

        if !status.is_success() {
            warn!("iTunes lookup returned status {}: {}", status, url);
            return Err(SourceError::InvalidResponse(format!(
                "Unexpected status: {}",
                status
            )));
        }

        // The lookup endpoint answers with text/javascript, so decode from text
        let body = response.text().await?;
        let lookup: LookupResponse = serde_json::from_str(&body).map_err(|e| {
            warn!("Failed to parse iTunes lookup response: {}", e);
            SourceError::InvalidResponse(e.to_string())
        })?;

        let raw = lookup
            .results
            .into_iter()
            .next()
            .map(|result| result.version)
            .ok_or_else(|| SourceError::NotFound(region.bundle_id().to_string()))?;

        VersionString::parse(&raw).ok_or_else(|| {
            SourceError::InvalidResponse(format!("Unparseable version: {:?}", raw))
        })
    }

    /// Version text shown on the storefront page, label stripped
    pub async fn fetch_page_version(&self, region: Region) -> Result<Option<String>, SourceError> {
        let html = fetch_page(&self.client, &self.page_url(region)).await?;
        Ok(select_text(&html, &WHATS_NEW_VERSION).and_then(|text| strip_version_label(&text)))
    }
}

#[async_trait::async_trait]
impl VersionSource for AppStoreSource {
    fn store(&self) -> Store {
        Store::AppStore
    }

    async fn observe(&self, region: Region) -> Result<Observation, SourceError> {
        let api_version = self.fetch_api_version(region).await?;
        debug!("{} App Store lookup reports {}", region, api_version);

        let page_version = self
            .fetch_page_version(region)
            .await
            .inspect_err(|e| warn!("Failed to scrape {} App Store page: {}", region, e))
            .ok()
            .flatten();

        let reconciled = reconcile(api_version, page_version.as_deref());
        if let Some(ahead) = &reconciled.page_ahead {
            warn!(
                "{} App Store page ({}) is ahead of the lookup API ({}), using the page",
                region, ahead.page, ahead.api
            );
        }

        Ok(Observation {
            region,
            store: Store::AppStore,
            version: reconciled.version,
            source: reconciled.source,
        })
    }
}
