//! Out-of-band failure alerting
//!
//! Alerts are best-effort: every sink swallows and logs its own failures,
//! and delivery never blocks the pipeline beyond handing the message off.

use url::Url;

use crate::config::ApiConfig;

/// A best-effort destination for escalation notices.
pub trait AlertSink: Send {
    /// Hands a message off for delivery. Implementations must not panic
    /// and must not propagate delivery failures.
    fn notify(&self, message: &str);
}

/// Fallback sink: the alert only reaches the log.
pub struct LogAlert;

impl AlertSink for LogAlert {
    fn notify(&self, message: &str) {
        tracing::error!("ALERT: {}", message);
    }
}

/// Posts alerts as JSON to a webhook, fire-and-forget.
pub struct WebhookAlert {
    http: reqwest::Client,
    endpoint: Url,
}

impl WebhookAlert {
    pub fn new(endpoint: Url) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint,
        }
    }
}

impl AlertSink for WebhookAlert {
    fn notify(&self, message: &str) {
        let http = self.http.clone();
        let endpoint = self.endpoint.clone();
        let body = serde_json::json!({ "text": message });

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                handle.spawn(async move {
                    if let Err(e) = http.post(endpoint).json(&body).send().await {
                        tracing::warn!("Failed to deliver alert: {}", e);
                    }
                });
            }
            Err(_) => {
                tracing::warn!("No async runtime available to deliver alert: {}", message);
            }
        }
    }
}

/// Builds the configured alert sink: a webhook if one is set, otherwise
/// log-only.
pub fn alert_from_config(config: &ApiConfig) -> Box<dyn AlertSink + Send> {
    match &config.alert_webhook {
        Some(raw) => match Url::parse(raw) {
            Ok(endpoint) => Box::new(WebhookAlert::new(endpoint)),
            Err(e) => {
                tracing::warn!("Ignoring unparseable alert-webhook ({}); alerts go to the log", e);
                Box::new(LogAlert)
            }
        },
        None => Box::new(LogAlert),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn api_config(webhook: Option<&str>) -> ApiConfig {
        ApiConfig {
            base_url: "https://sis.example.edu/api/classes".to_string(),
            requests_per_minute: 100,
            timeout_secs: 30,
            connect_timeout_secs: 10,
            alert_webhook: webhook.map(String::from),
        }
    }

    #[test]
    fn test_log_alert_never_panics() {
        LogAlert.notify("harvest paused: HTTP 503");
    }

    #[test]
    fn test_alert_from_config_without_webhook() {
        // Smoke test: the fallback sink accepts messages
        let sink = alert_from_config(&api_config(None));
        sink.notify("message");
    }

    #[test]
    fn test_webhook_notify_without_runtime_is_swallowed() {
        let sink = WebhookAlert::new(Url::parse("https://hooks.example.com/alert").unwrap());
        // No tokio runtime here; delivery is dropped with a warning
        sink.notify("message");
    }
}
