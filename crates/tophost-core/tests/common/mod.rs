//! Shared test doubles for reconciler contract tests

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tophost_core::error::{Error, Result};
use tophost_core::record::{DnsRecord, RecordUpdate};
use tophost_core::traits::ControlPanel;

/// Build a scraped record with an empty priority
pub fn record(id: &str, name: &str, record_type: &str, value: &str) -> DnsRecord {
    DnsRecord {
        id: id.to_string(),
        name: name.to_string(),
        record_type: record_type.to_string(),
        value: value.to_string(),
        priority: String::new(),
    }
}

/// Controllable panel double
///
/// Records every update submission so tests can assert exactly which POSTs
/// the reconciler issued, and in what order.
pub struct MockPanel {
    records: Vec<DnsRecord>,
    records_failure: Mutex<Option<Error>>,
    failing_updates: HashSet<String>,
    updates: Arc<Mutex<Vec<RecordUpdate>>>,
}

impl MockPanel {
    pub fn with_records(records: Vec<DnsRecord>) -> Self {
        Self {
            records,
            records_failure: Mutex::new(None),
            failing_updates: HashSet::new(),
            updates: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Panel whose records() call fails with the given error
    pub fn failing_records(error: Error) -> Self {
        let panel = Self::with_records(Vec::new());
        *panel.records_failure.lock().unwrap() = Some(error);
        panel
    }

    /// Make updates targeting the given row id fail
    pub fn fail_update_for(mut self, record_id: &str) -> Self {
        self.failing_updates.insert(record_id.to_string());
        self
    }

    /// Handle onto the submissions seen so far; clone before boxing the panel
    pub fn updates_handle(&self) -> Arc<Mutex<Vec<RecordUpdate>>> {
        Arc::clone(&self.updates)
    }
}

#[async_trait]
impl ControlPanel for MockPanel {
    async fn records(&self) -> Result<Vec<DnsRecord>> {
        if let Some(error) = self.records_failure.lock().unwrap().take() {
            return Err(error);
        }
        Ok(self.records.clone())
    }

    async fn update_record(&self, update: &RecordUpdate) -> Result<()> {
        self.updates.lock().unwrap().push(update.clone());
        if self.failing_updates.contains(&update.record) {
            return Err(Error::update_failed("simulated panel rejection"));
        }
        Ok(())
    }

    fn panel_name(&self) -> &'static str {
        "mock"
    }
}
