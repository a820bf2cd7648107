//! Announcements posted to a chat webhook

#[cfg(test)]
use mockall::automock;
use serde::Serialize;
use tracing::warn;

use crate::error::NotifyError;
use crate::target::{Region, Store};
use crate::version::dotted::VersionString;

/// Message sent when a new version is detected, posted as form fields
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Announcement {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar_url: Option<String>,
}

impl Announcement {
    pub fn new(region: Region, store: Store, version: &VersionString) -> Self {
        Self {
            content: format!("New {} {} update: v{}", region, store, version),
            username: Some(store.display_name().to_string()),
            avatar_url: Some(store.icon_url().to_string()),
        }
    }
}

/// Trait for delivering announcements
#[cfg_attr(test, automock)]
#[async_trait::async_trait]
pub trait Notifier: Send + Sync {
    /// Deliver one announcement. Callers log failures and move on.
    async fn announce(&self, announcement: &Announcement) -> Result<(), NotifyError>;
}

/// Notifier posting to a Discord-style webhook
pub struct WebhookNotifier {
    client: reqwest::Client,
    url: String,
}

impl WebhookNotifier {
    pub fn new(url: &str, client: reqwest::Client) -> Self {
        Self {
            client,
            url: url.to_string(),
        }
    }
}

#[async_trait::async_trait]
impl Notifier for WebhookNotifier {
    async fn announce(&self, announcement: &Announcement) -> Result<(), NotifyError> {
        let response = self
            .client
            .post(&self.url)
            .form(announcement)
            .send()
            .await?;

        let status = response.status();

        if !status.is_success() {
            warn!("Webhook returned status {}", status);
            return Err(NotifyError::Rejected(status));
        }

        Ok(())
    }
}
