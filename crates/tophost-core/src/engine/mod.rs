//! Record reconciliation
//!
//! The Reconciler is responsible for:
//! - Scraping current record state via ControlPanel
//! - Deciding, per requested name, whether an update POST is needed
//! - Isolating per-name failures so one bad name never aborts the run
//!
//! ## Flow
//!
//! 1. Fetch and scrape the management page (once per run)
//! 2. For each requested name, in order:
//!    - select the first exact-name type-A record
//!    - submit an update when the value differs or the force flag is set
//!    - record the outcome and continue with the next name
//!
//! A page-access or scrape failure aborts the whole run; everything after
//! that point is per-name. Every HTTP call is attempted exactly once; no
//! retries anywhere.

use tracing::{debug, error, info};

use crate::error::{Error, Result};
use crate::record::{DnsRecord, RecordUpdate, find_a_record};
use crate::traits::ControlPanel;

/// Per-name result of one reconciliation pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// An update was submitted and acknowledged
    Updated { name: String },

    /// The scraped value already matched and the force flag was off
    Unchanged { name: String },

    /// No type-A record with this name exists in the panel
    MissingRecord { name: String },

    /// The panel rejected the update submission
    UpdateFailed { name: String, reason: String },
}

impl ReconcileOutcome {
    /// The requested name this outcome belongs to
    pub fn name(&self) -> &str {
        match self {
            Self::Updated { name }
            | Self::Unchanged { name }
            | Self::MissingRecord { name }
            | Self::UpdateFailed { name, .. } => name,
        }
    }
}

/// Core reconciliation engine
///
/// Holds the authenticated panel session and the force flag; the requested
/// names and target value are supplied per run. Execution is strictly
/// sequential, one request in flight at a time.
pub struct Reconciler {
    /// Authenticated control panel session
    panel: Box<dyn ControlPanel>,

    /// Submit updates even when the scraped value already matches
    force_update: bool,
}

impl Reconciler {
    /// Create a new reconciler over an authenticated panel session
    pub fn new(panel: Box<dyn ControlPanel>, force_update: bool) -> Self {
        Self {
            panel,
            force_update,
        }
    }

    /// Reconcile each requested name against the panel's current records
    ///
    /// Outcomes are logged as they are produced and returned in request
    /// order. Per-name failures are outcomes, not errors.
    ///
    /// # Errors
    ///
    /// `Error::AccessFailed` or `Error::ScrapeFailed` if current record
    /// state could not be obtained; the run is aborted before any name is
    /// processed.
    pub async fn run(&self, names: &[String], value: &str) -> Result<Vec<ReconcileOutcome>> {
        let records = self.panel.records().await?;
        debug!(
            "scraped {} record(s) from {}",
            records.len(),
            self.panel.panel_name()
        );

        let mut outcomes = Vec::with_capacity(names.len());
        for name in names {
            let outcome = match self.reconcile_name(&records, name, value).await {
                Ok(outcome) => outcome,
                Err(Error::MissingRecord(name)) => ReconcileOutcome::MissingRecord { name },
                Err(e) => ReconcileOutcome::UpdateFailed {
                    name: name.clone(),
                    reason: e.to_string(),
                },
            };
            report(&outcome);
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// Reconcile a single requested name
    async fn reconcile_name(
        &self,
        records: &[DnsRecord],
        name: &str,
        value: &str,
    ) -> Result<ReconcileOutcome> {
        let record =
            find_a_record(records, name).ok_or_else(|| Error::missing_record(name))?;

        if record.value == value && !self.force_update {
            return Ok(ReconcileOutcome::Unchanged {
                name: name.to_string(),
            });
        }

        let update = RecordUpdate::replace_value(record, value);
        self.panel.update_record(&update).await?;

        Ok(ReconcileOutcome::Updated {
            name: name.to_string(),
        })
    }
}

/// Log one outcome
fn report(outcome: &ReconcileOutcome) {
    match outcome {
        ReconcileOutcome::Updated { name } => info!("updated DNS record ({})", name),
        ReconcileOutcome::Unchanged { name } => info!("DNS record unchanged ({})", name),
        ReconcileOutcome::MissingRecord { name } => error!("missing DNS record ({})", name),
        ReconcileOutcome::UpdateFailed { name, reason } => {
            error!("failed to update DNS record ({}): {}", name, reason)
        }
    }
}
