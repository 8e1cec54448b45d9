//! Error types for the updater
//!
//! This module defines all error types used throughout the crate.

use thiserror::Error;

/// Result type alias for updater operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the updater
///
/// Configuration, authentication, page-access and scrape failures are fatal
/// to a run. Per-name failures (`MissingRecord`, `UpdateFailed`) are isolated
/// by the reconciler and reported as outcomes instead of aborting the run.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration errors (missing credentials, unreadable settings file)
    #[error("configuration error: {0}")]
    Config(String),

    /// The login endpoint refused the attempt with status 403
    #[error("exceeded login rate limit")]
    RateLimited,

    /// Authentication failed (bad status or an error in the response body)
    #[error("failed to log in: {0}")]
    LoginFailed(String),

    /// The update-value lookup failed
    #[error("failed to fetch update value: {0}")]
    FetchFailed(String),

    /// The DNS management page could not be retrieved
    #[error("failed to access control panel: {0}")]
    AccessFailed(String),

    /// The DNS management page could not be parsed into records
    #[error("failed to scrape DNS records: {0}")]
    ScrapeFailed(String),

    /// No type-A record with the requested name exists in the panel
    #[error("missing DNS record ({0})")]
    MissingRecord(String),

    /// The panel rejected an update submission
    #[error("failed to update DNS record: {0}")]
    UpdateFailed(String),

    /// JSON decoding errors from panel responses
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a login failure
    pub fn login_failed(msg: impl Into<String>) -> Self {
        Self::LoginFailed(msg.into())
    }

    /// Create an update-value fetch failure
    pub fn fetch_failed(msg: impl Into<String>) -> Self {
        Self::FetchFailed(msg.into())
    }

    /// Create a page-access failure
    pub fn access_failed(msg: impl Into<String>) -> Self {
        Self::AccessFailed(msg.into())
    }

    /// Create a scrape failure
    pub fn scrape_failed(msg: impl Into<String>) -> Self {
        Self::ScrapeFailed(msg.into())
    }

    /// Create a missing-record error for a requested name
    pub fn missing_record(name: impl Into<String>) -> Self {
        Self::MissingRecord(name.into())
    }

    /// Create an update failure
    pub fn update_failed(msg: impl Into<String>) -> Self {
        Self::UpdateFailed(msg.into())
    }
}
