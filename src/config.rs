use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::error::ConfigError;

// =============================================================================
// Constants
// =============================================================================

/// Version assumed for targets with no recorded snapshot.
/// Low enough that the first real observation is announced.
pub const FLOOR_VERSION: &str = "2.0.0";

/// Browser-like identification; the storefronts block unknown agents
pub const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/88.0.4324.182 Safari/537.36";

/// Timeout for fetch operations in milliseconds (30 seconds)
pub const FETCH_TIMEOUT_MS: u64 = 30_000;

/// Environment variable overriding the working directory
pub const HOME_ENV: &str = "STOREWATCH_HOME";

/// Environment variable holding the tracing filter
pub const LOG_ENV: &str = "STOREWATCH_LOG";

pub const CONFIG_FILE_NAME: &str = "storewatch.json";
pub const LOG_FILE_NAME: &str = "storewatch.log";

/// Optional settings read from `storewatch.json`
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct WatchConfig {
    /// Snapshot of last announced versions, relative to the working directory
    pub snapshot_file: PathBuf,
    /// File whose only content is the webhook URL
    pub webhook_file: PathBuf,
    pub fetch_timeout_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self {
            snapshot_file: PathBuf::from("current_ver.json"),
            webhook_file: PathBuf::from("WEBHOOK.url"),
            fetch_timeout_ms: FETCH_TIMEOUT_MS,
        }
    }
}

impl WatchConfig {
    /// Read `storewatch.json` from `home`, using defaults when it does not exist
    pub fn load(home: &Path) -> Result<Self, ConfigError> {
        let path = home.join(CONFIG_FILE_NAME);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn snapshot_path(&self, home: &Path) -> PathBuf {
        home.join(&self.snapshot_file)
    }

    pub fn webhook_path(&self, home: &Path) -> PathBuf {
        home.join(&self.webhook_file)
    }

    pub fn fetch_timeout(&self) -> Duration {
        Duration::from_millis(self.fetch_timeout_ms)
    }

    /// Read the webhook URL. The content is opaque; only surrounding whitespace is dropped.
    pub fn read_webhook_url(&self, home: &Path) -> Result<String, ConfigError> {
        let path = self.webhook_path(home);
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ConfigError::MissingWebhook(path));
            }
            Err(e) => return Err(e.into()),
        };

        let url = content.trim();
        if url.is_empty() {
            return Err(ConfigError::MissingWebhook(path));
        }
        Ok(url.to_string())
    }
}

/// Returns the working directory.
/// Uses $STOREWATCH_HOME if set, otherwise the current directory.
pub fn home_dir() -> PathBuf {
    home_dir_with_env(std::env::var(HOME_ENV).ok())
}

fn home_dir_with_env(storewatch_home: Option<String>) -> PathBuf {
    storewatch_home
        .filter(|home| !home.is_empty())
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}
