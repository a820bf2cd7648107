//! Shared plumbing for storefront pages: HTTP client, page fetch and text selection

use std::sync::LazyLock;
use std::time::Duration;

use regex::Regex;
use scraper::{Html, Selector};
use tracing::warn;

use crate::config::USER_AGENT;
use crate::error::SourceError;

static VERSION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+(?:\s*\.\s*\d+)*").unwrap());

/// Build the HTTP client shared by every source and the notifier
pub fn http_client(timeout: Duration) -> reqwest::Client {
    reqwest::Client::builder()
        .user_agent(USER_AGENT)
        .timeout(timeout)
        .build()
        .expect("Failed to create HTTP client")
}

/// GET a page and return its body, treating any non-2xx status as an error
pub async fn fetch_page(client: &reqwest::Client, url: &str) -> Result<String, SourceError> {
    let response = client.get(url).send().await?;

    let status = response.status();

    if status == reqwest::StatusCode::NOT_FOUND {
        return Err(SourceError::NotFound(url.to_string()));
    }

    if !status.is_success() {
        warn!("Storefront returned status {}: {}", status, url);
        return Err(SourceError::InvalidResponse(format!(
            "Unexpected status: {}",
            status
        )));
    }

    Ok(response.text().await?)
}

/// Text content of the first node matching `selector`, or `None` if nothing matches
pub fn select_text(html: &str, selector: &Selector) -> Option<String> {
    let document = Html::parse_document(html);
    let element = document.select(selector).next()?;
    let text = element.text().collect::<String>();
    let text = text.trim();
    (!text.is_empty()).then(|| text.to_string())
}

/// Strip a localized label around a version ("Version 2.5.0", "バージョン 2.5.0")
pub fn strip_version_label(text: &str) -> Option<String> {
    VERSION_REGEX
        .find(text)
        .map(|m| m.as_str().split_whitespace().collect())
}
