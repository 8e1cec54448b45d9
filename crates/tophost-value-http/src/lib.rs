// # HTTP Update Value Source
//
// This crate provides the HTTP-based update-value source for the updater.
//
// ## Purpose
//
// When no explicit value is configured, the value to publish is looked up
// from an external service, by default a public-IP echo endpoint. The
// response body is the value, verbatim: it is not trimmed, parsed or
// validated here, because the configured service may legitimately return
// something other than an address.
//
// One GET per run. No polling, no caching, no retries.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use tracing::debug;

use tophost_core::error::{Error, Result};
use tophost_core::traits::UpdateValueSource;

/// Default lookup service (returns the caller's public address as plain text)
pub const DEFAULT_VALUE_URL: &str = "https://ipinfo.io/ip";

/// HTTP-based update-value source
pub struct HttpValueSource {
    url: String,
    client: reqwest::Client,
}

impl HttpValueSource {
    /// Create a source for the given URL
    ///
    /// The user-agent is attached to the lookup request; an empty string is
    /// a valid, literal value to send.
    pub fn new(url: impl Into<String>, user_agent: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|e| Error::config(format!("invalid user agent: {}", e)))?,
        );

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            url: url.into(),
            client,
        })
    }
}

#[async_trait]
impl UpdateValueSource for HttpValueSource {
    async fn fetch(&self) -> Result<String> {
        debug!("fetching update value from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| Error::fetch_failed(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::fetch_failed(format!(
                "value service returned status {}",
                status
            )));
        }

        response
            .text()
            .await
            .map_err(|e| Error::fetch_failed(format!("failed to read response: {}", e)))
    }
}
