// # tophost-core
//
// Core library for the Tophost dynamic DNS updater.
//
// The Tophost control panel exposes no API: record state is scraped out of
// the rendered DNS management page and updates go through the same form
// endpoints a browser would use. This crate holds everything that is NOT
// coupled to that markup:
//
// - **Settings**: the merged file + command-line configuration
// - **DnsRecord / RecordUpdate**: the scraped record model and update payload
// - **ControlPanel**: trait for the panel session (fetch records, submit updates)
// - **UpdateValueSource**: trait for obtaining the value to publish
// - **Reconciler**: compares requested names against scraped state and
//   decides, per name, whether an update POST is needed
//
// The markup-coupled half lives in the `tophost-panel` crate behind the
// `ControlPanel` seam, so the reconciliation flow is unaffected by page
// layout changes.

pub mod config;
pub mod engine;
pub mod error;
pub mod record;
pub mod traits;

// Re-export core types for convenience
pub use config::{Credentials, Overrides, Settings};
pub use engine::{ReconcileOutcome, Reconciler};
pub use error::{Error, Result};
pub use record::{DnsRecord, RecordUpdate, find_a_record};
pub use traits::{ControlPanel, UpdateValueSource};
