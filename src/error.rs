use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("App not found: {0}")]
    NotFound(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("Snapshot I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed snapshot: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to replace snapshot: {0}")]
    Persist(#[from] tempfile::PersistError),
}

#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Webhook rejected the message with status {0}")]
    Rejected(reqwest::StatusCode),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("No webhook URL found in {0:?}")]
    MissingWebhook(PathBuf),
}
