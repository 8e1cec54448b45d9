// # Tophost Control Panel Client
//
// This crate implements the `ControlPanel` seam against the Tophost web
// control panel (cp.tophost.it). The panel exposes no API:
//
// - authentication is a form POST against the login endpoint, with the
//   session carried in cookies afterwards;
// - record state is scraped out of the rendered DNS management page
//   (see the `scrape` module, the only code coupled to the markup);
// - updates are form POSTs mimicking the page's own edit form.
//
// Responses from the login and update endpoints are JSON acknowledgements
// whose only interesting property is an optional `error` field. They are
// decoded once, at the boundary, into a tagged result.
//
// Every method makes exactly one HTTP request. No retries, no caching, no
// background tasks; the reconciler owns the control flow. No request
// timeout is set; the client's defaults apply.

use async_trait::async_trait;
use reqwest::StatusCode;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use serde::Deserialize;
use tracing::debug;

use tophost_core::config::Credentials;
use tophost_core::error::{Error, Result};
use tophost_core::record::{DnsRecord, RecordUpdate};
use tophost_core::traits::ControlPanel;

pub mod scrape;

/// Production control panel base URL
pub const DEFAULT_BASE_URL: &str = "https://cp.tophost.it";

const LOGIN_PATH: &str = "/x-login";
const DNS_PAGE_PATH: &str = "/dns";
const DNS_UPDATE_PATH: &str = "/x-dns-mod";

/// Authenticating client for the Tophost control panel
///
/// The session cookie issued at login lives in the client's cookie store and
/// is replayed on every subsequent request made through the same client. The
/// session is valid until the process exits; there is no explicit logout.
///
/// The configured user-agent is attached to every request. An empty string
/// is a valid, literal value to send.
pub struct PanelClient {
    http: reqwest::Client,
    base_url: String,
}

/// JSON acknowledgement returned by the login and update endpoints
#[derive(Debug, Deserialize)]
struct PanelAck {
    error: Option<String>,
}

impl PanelAck {
    /// Collapse the ack into a tagged result
    fn into_result(self) -> std::result::Result<(), String> {
        match self.error {
            Some(message) => Err(message),
            None => Ok(()),
        }
    }
}

impl PanelClient {
    /// Create a client against the production panel
    pub fn new(user_agent: &str) -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL, user_agent)
    }

    /// Create a client against an explicit base URL (tests, staging)
    pub fn with_base_url(base_url: impl Into<String>, user_agent: &str) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(user_agent)
                .map_err(|e| Error::config(format!("invalid user agent: {}", e)))?,
        );

        let http = reqwest::Client::builder()
            .cookie_store(true)
            .default_headers(headers)
            .build()
            .map_err(|e| Error::config(format!("failed to build HTTP client: {}", e)))?;

        let base_url = base_url.into().trim_end_matches('/').to_string();

        Ok(Self { http, base_url })
    }

    /// Authenticate the session
    ///
    /// Submits the login form; on success the session cookie is stored and
    /// the client can be used for all subsequent panel calls.
    ///
    /// # Errors
    ///
    /// - `Error::RateLimited` on status 403
    /// - `Error::LoginFailed` on any other non-success status, or when the
    ///   acknowledgement carries an `error` message
    pub async fn login(&self, credentials: &Credentials) -> Result<()> {
        let response = self
            .http
            .post(format!("{}{}", self.base_url, LOGIN_PATH))
            .form(&[
                ("user", credentials.username.as_str()),
                ("pass", credentials.password.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::login_failed(format!("login request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::FORBIDDEN {
                return Err(Error::RateLimited);
            }
            return Err(Error::login_failed(format!(
                "login rejected with status {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::login_failed(format!("failed to read login response: {}", e)))?;
        let ack: PanelAck = serde_json::from_str(&body)?;
        ack.into_result().map_err(Error::login_failed)?;

        debug!("authenticated against {}", self.base_url);
        Ok(())
    }
}

#[async_trait]
impl ControlPanel for PanelClient {
    async fn records(&self) -> Result<Vec<DnsRecord>> {
        let response = self
            .http
            .get(format!("{}{}", self.base_url, DNS_PAGE_PATH))
            .send()
            .await
            .map_err(|e| Error::access_failed(format!("request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::access_failed(format!(
                "control panel returned status {}",
                status
            )));
        }

        let html = response
            .text()
            .await
            .map_err(|e| Error::access_failed(format!("failed to read page: {}", e)))?;

        scrape::parse_records(&html)
    }

    async fn update_record(&self, update: &RecordUpdate) -> Result<()> {
        debug!("submitting update for record {}", update.record);

        let response = self
            .http
            .post(format!("{}{}", self.base_url, DNS_UPDATE_PATH))
            .form(update)
            .send()
            .await
            .map_err(|e| Error::update_failed(format!("update request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::update_failed(format!(
                "update rejected with status {}",
                status
            )));
        }

        let body = response
            .text()
            .await
            .map_err(|e| Error::update_failed(format!("failed to read update response: {}", e)))?;
        let ack: PanelAck = serde_json::from_str(&body)?;
        ack.into_result().map_err(Error::update_failed)?;

        Ok(())
    }

    fn panel_name(&self) -> &'static str {
        "tophost"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ack_without_error_is_ok() {
        let ack: PanelAck = serde_json::from_str("{}").unwrap();
        assert!(ack.into_result().is_ok());

        let ack: PanelAck = serde_json::from_str(r#"{"session": "abc"}"#).unwrap();
        assert!(ack.into_result().is_ok());
    }

    #[test]
    fn ack_with_error_carries_the_message() {
        let ack: PanelAck = serde_json::from_str(r#"{"error": "Wrong password"}"#).unwrap();
        assert_eq!(ack.into_result().unwrap_err(), "Wrong password");
    }

    #[test]
    fn empty_user_agent_is_a_valid_header_value() {
        assert!(PanelClient::new("").is_ok());
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = PanelClient::with_base_url("https://cp.example.test/", "ua").unwrap();
        assert_eq!(client.base_url, "https://cp.example.test");
    }
}
