//! Cooperative request pacing
//!
//! The remote service is never told to slow us down; we slow ourselves.
//! A requests-per-minute budget translates to a minimum gap of `60/rpm`
//! seconds between the completion of one request and the start of the
//! next. The rate is mutable because operator resume installs a new one
//! after an escalation.

use std::time::{Duration, Instant};

/// Tracks the inter-request gap for a single client.
#[derive(Debug, Clone)]
pub struct Pacer {
    requests_per_minute: u32,
    last_completed: Option<Instant>,
}

impl Pacer {
    /// Creates a pacer with the given requests-per-minute budget.
    /// A zero rate is clamped to 1.
    pub fn new(requests_per_minute: u32) -> Self {
        Self {
            requests_per_minute: requests_per_minute.max(1),
            last_completed: None,
        }
    }

    /// The current requests-per-minute budget.
    pub fn rate(&self) -> u32 {
        self.requests_per_minute
    }

    /// Installs a new requests-per-minute budget (operator resume).
    pub fn set_rate(&mut self, requests_per_minute: u32) {
        self.requests_per_minute = requests_per_minute.max(1);
    }

    /// The minimum gap between requests under the current budget.
    pub fn min_gap(&self) -> Duration {
        Duration::from_secs_f64(60.0 / self.requests_per_minute as f64)
    }

    /// Time remaining before the next request may be issued.
    ///
    /// Returns None if a request can be issued now. The gap is measured
    /// from the moment the previous request returned, not when it started.
    pub fn delay_until_ready(&self, now: Instant) -> Option<Duration> {
        let last = self.last_completed?;
        let gap = self.min_gap();
        let elapsed = now.duration_since(last);
        if elapsed < gap {
            Some(gap - elapsed)
        } else {
            None
        }
    }

    /// Records that a request just returned.
    pub fn record_completion(&mut self, now: Instant) {
        self.last_completed = Some(now);
    }
}
