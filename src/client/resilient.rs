//! The resilient request client
//!
//! One logical request at a time, paced against a requests-per-minute
//! budget, with a pause-and-resume loop on hard failure. The state machine
//! is: Idle → Paced-Wait → In-Flight → {Success, NoData, Escalated};
//! Escalated → Awaiting-Operator-Input → Paced-Wait, retrying the same
//! request. There are no other transitions: a request is never dropped
//! on failure, and the client never retries on its own without an
//! operator-supplied rate.
//!
//! Network-classified errors (timeouts, connection errors) are NEVER
//! treated as soft absence, even when the caller allows soft failures:
//! they signal ambient conditions (throttling, outage) that would
//! otherwise cause silent large-scale data loss.

use std::time::{Duration, Instant};

use reqwest::{Client, StatusCode};
use serde_json::Value;
use url::Url;

use crate::client::alert::AlertSink;
use crate::client::pacing::Pacer;
use crate::client::resume::OperatorResume;
use crate::config::ApiConfig;
use crate::{HarvestError, Result};

/// Environment variable holding the static API credential.
pub const API_KEY_VAR: &str = "SIS_API_KEY";

/// Error statuses the remote is known to answer for absent records.
/// Anything else is a hard failure.
const SOFT_ABSENCE_STATUSES: [StatusCode; 2] =
    [StatusCode::NOT_FOUND, StatusCode::INTERNAL_SERVER_ERROR];

/// What a completed request produced.
#[derive(Debug)]
pub enum FetchOutcome {
    /// HTTP 200 with a parseable JSON body.
    Payload(Value),

    /// A whitelisted absence status under soft-failure mode. The caller
    /// should treat this as an empty result, not retry.
    NoData,
}

/// Builds the HTTP transport with the configured timeouts.
pub fn build_http_client(config: &ApiConfig) -> std::result::Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(Duration::from_secs(config.timeout_secs))
        .connect_timeout(Duration::from_secs(config.connect_timeout_secs))
        .gzip(true)
        .brotli(true)
        .build()
}

/// Issues single logical requests against the remote service. Owns pacing
/// and failure recovery; has no knowledge of scheduling.
///
/// Methods take `&mut self`: the pacing state is exclusively owned and
/// requests serialize through one instance. While escalated, no caller
/// proceeds.
pub struct ResilientClient {
    http: Client,
    pacer: Pacer,
    api_key: String,
    alerts: Box<dyn AlertSink + Send>,
    resume: Box<dyn OperatorResume + Send>,
}

impl ResilientClient {
    /// Creates a client with an explicit credential.
    pub fn new(
        config: &ApiConfig,
        api_key: String,
        alerts: Box<dyn AlertSink + Send>,
        resume: Box<dyn OperatorResume + Send>,
    ) -> Result<Self> {
        let http = build_http_client(config)?;
        Ok(Self {
            http,
            pacer: Pacer::new(config.requests_per_minute),
            api_key,
            alerts,
            resume,
        })
    }

    /// Creates a client with the credential from the process environment.
    ///
    /// A missing credential is a fatal startup condition: no component may
    /// issue requests without one.
    pub fn from_env(
        config: &ApiConfig,
        alerts: Box<dyn AlertSink + Send>,
        resume: Box<dyn OperatorResume + Send>,
    ) -> Result<Self> {
        let api_key = std::env::var(API_KEY_VAR)
            .map_err(|_| HarvestError::MissingCredential(API_KEY_VAR))?;
        Self::new(config, api_key, alerts, resume)
    }

    /// The current requests-per-minute budget.
    pub fn rate(&self) -> u32 {
        self.pacer.rate()
    }

    /// Performs one logical request.
    ///
    /// Returns only on success or whitelisted absence. Hard failures
    /// (unwhitelisted status, connection error, timeout, non-JSON 200
    /// body) alert, suspend for operator input, install the new rate and
    /// retry the same request. The call that triggered escalation is
    /// never lost.
    pub async fn request(&mut self, url: Url, allow_soft: bool) -> FetchOutcome {
        loop {
            if let Some(delay) = self.pacer.delay_until_ready(Instant::now()) {
                tokio::time::sleep(delay).await;
            }

            let attempt = self.attempt(&url, allow_soft).await;
            self.pacer.record_completion(Instant::now());

            match attempt {
                Ok(outcome) => return outcome,
                Err(reason) => self.escalate(&url, &reason),
            }
        }
    }

    /// One in-flight attempt. `Err` carries a hard-failure description.
    async fn attempt(
        &self,
        url: &Url,
        allow_soft: bool,
    ) -> std::result::Result<FetchOutcome, String> {
        let response = self
            .http
            .get(url.clone())
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(describe_send_error)?;

        let status = response.status();

        if status == StatusCode::OK {
            // A non-JSON body on a 200 is protocol drift, not absence.
            return match response.json::<Value>().await {
                Ok(payload) => Ok(FetchOutcome::Payload(payload)),
                Err(e) => Err(format!("invalid JSON body on 200 response: {}", e)),
            };
        }

        if allow_soft && SOFT_ABSENCE_STATUSES.contains(&status) {
            tracing::warn!("Benign absence (HTTP {}) for {}", status.as_u16(), url);
            return Ok(FetchOutcome::NoData);
        }

        Err(format!("HTTP {}", status.as_u16()))
    }

    /// Alert (best-effort), block for a new rate, install it.
    fn escalate(&mut self, url: &Url, reason: &str) {
        tracing::error!("Request failed for {}: {}", url, reason);
        self.alerts
            .notify(&format!("Harvest paused: {} ({})", reason, url));

        let new_rate = self.resume.await_new_rate(reason, self.pacer.rate());
        tracing::info!("Resuming at {} requests/minute", new_rate);
        self.pacer.set_rate(new_rate);
    }
}

/// Classifies transport errors for the escalation message.
fn describe_send_error(e: reqwest::Error) -> String {
    if e.is_timeout() {
        "request timeout".to_string()
    } else if e.is_connect() {
        format!("connection error: {}", e)
    } else {
        e.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::alert::LogAlert;
    use crate::client::resume::FixedRateResume;

    fn api_config() -> ApiConfig {
        ApiConfig {
            base_url: "https://sis.example.edu/api/classes".to_string(),
            requests_per_minute: 100,
            timeout_secs: 30,
            connect_timeout_secs: 10,
            alert_webhook: None,
        }
    }

    #[test]
    fn test_build_http_client() {
        let client = build_http_client(&api_config());
        assert!(client.is_ok());
    }

    #[test]
    fn test_client_with_explicit_key() {
        let client = ResilientClient::new(
            &api_config(),
            "secret".to_string(),
            Box::new(LogAlert),
            Box::new(FixedRateResume::new(10)),
        );
        assert!(client.is_ok());
        assert_eq!(client.unwrap().rate(), 100);
    }

    // Pacing, soft-failure and escalation behavior are exercised against a
    // live mock server in tests/scrape_tests.rs.
}
