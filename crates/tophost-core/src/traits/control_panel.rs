// # Control Panel Trait
//
// Defines the interface for reading and updating DNS records through an
// authenticated control panel session.
//
// ## Implementations
//
// - Tophost: `tophost-panel` crate (HTML scraping over cp.tophost.it)
//
// The reconciler depends only on this trait, so everything coupled to a
// specific panel's markup stays inside the implementing crate. Sessions are
// established before the trait object is handed to the reconciler; cookie
// state must persist across all calls made through the same handle.

use async_trait::async_trait;

use crate::error::Result;
use crate::record::{DnsRecord, RecordUpdate};

/// Trait for authenticated control panel sessions
///
/// Implementations make exactly one HTTP request per method call: no
/// retries, no caching. Record lists are scraped fresh on every `records()`
/// call and are never reused across reconciliation passes.
#[async_trait]
pub trait ControlPanel: Send + Sync {
    /// Fetch the DNS management page and scrape the current records
    ///
    /// Returns records in document row order.
    ///
    /// # Errors
    ///
    /// - `Error::AccessFailed` if the page could not be retrieved
    /// - `Error::ScrapeFailed` if the page could not be parsed; one
    ///   malformed row invalidates the whole parse, never a partial list
    async fn records(&self) -> Result<Vec<DnsRecord>>;

    /// Submit one record update
    ///
    /// # Errors
    ///
    /// `Error::UpdateFailed` if the panel responds with a non-success status
    /// or an error message in the response body.
    async fn update_record(&self, update: &RecordUpdate) -> Result<()>;

    /// Panel name for logging
    fn panel_name(&self) -> &'static str;
}
