//! Resilient request client
//!
//! This module owns everything between "the scheduler wants a payload"
//! and "bytes went over the wire":
//! - Cooperative pacing against a requests-per-minute budget
//! - Hard-failure escalation with best-effort alerting
//! - Blocking operator resume with a new rate
//! - The soft-absence whitelist for known benign error statuses

mod alert;
mod pacing;
mod resilient;
mod resume;

pub use alert::{alert_from_config, AlertSink, LogAlert, WebhookAlert};
pub use pacing::Pacer;
pub use resilient::{build_http_client, FetchOutcome, ResilientClient, API_KEY_VAR};
pub use resume::{FixedRateResume, OperatorResume, StdinResume};
