//! Watched regions, stores and the compiled-in table describing them

use serde::{Deserialize, Serialize};

/// Distribution territory of the app
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Region {
    /// North America (English release)
    #[serde(rename = "NA")]
    NorthAmerica,
    /// Japan
    #[serde(rename = "JP")]
    Japan,
}

impl Region {
    pub const ALL: [Region; 2] = [Region::NorthAmerica, Region::Japan];

    /// Returns the short label used in messages and in the snapshot file
    pub fn as_str(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "NA",
            Region::Japan => "JP",
        }
    }

    /// Package name on Google Play, also the bundle id on the App Store
    pub fn bundle_id(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "com.aniplex.fategrandorder.en",
            Region::Japan => "com.aniplex.fategrandorder",
        }
    }

    /// Numeric App Store id used by the storefront page
    pub fn app_store_id(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "1183802626",
            Region::Japan => "1015521325",
        }
    }

    /// Two-letter storefront country code
    pub fn country(&self) -> &'static str {
        match self {
            Region::NorthAmerica => "us",
            Region::Japan => "jp",
        }
    }
}

impl std::fmt::Display for Region {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Distribution platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Store {
    /// Google Play, observed by scraping the details page
    #[serde(rename = "Play Store")]
    PlayStore,
    /// Apple App Store, observed through the lookup API and the storefront page
    #[serde(rename = "App Store")]
    AppStore,
}

impl Store {
    pub const ALL: [Store; 2] = [Store::PlayStore, Store::AppStore];

    pub fn as_str(&self) -> &'static str {
        match self {
            Store::PlayStore => "Play Store",
            Store::AppStore => "App Store",
        }
    }

    /// Sender name shown on announcements
    pub fn display_name(&self) -> &'static str {
        match self {
            Store::PlayStore => "Google Play",
            Store::AppStore => "App Store",
        }
    }

    /// Avatar shown on announcements
    pub fn icon_url(&self) -> &'static str {
        match self {
            Store::PlayStore => {
                "https://www.gstatic.com/android/market_images/web/play_prism_hlock_2x.png"
            }
            Store::AppStore => {
                "https://developer.apple.com/assets/elements/icons/app-store/app-store-128x128_2x.png"
            }
        }
    }
}

impl std::fmt::Display for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single (region, store) pair whose latest version is tracked
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Target {
    pub region: Region,
    pub store: Store,
}

impl Target {
    pub fn new(region: Region, store: Store) -> Self {
        Self { region, store }
    }

    /// Every tracked target, region by region
    pub fn all() -> Vec<Target> {
        Region::ALL
            .iter()
            .flat_map(|region| Store::ALL.iter().map(|store| Target::new(*region, *store)))
            .collect()
    }
}

impl std::fmt::Display for Target {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.region, self.store)
    }
}
