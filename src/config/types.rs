use serde::Deserialize;

/// Main configuration structure for Catalog-Harvest
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub api: ApiConfig,
    pub catalog: CatalogConfig,
    pub output: OutputConfig,
}

/// Remote API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Base URL of the classes endpoint
    #[serde(rename = "base-url")]
    pub base_url: String,

    /// Self-imposed request budget; the client enforces a minimum gap of
    /// 60/rpm seconds between requests
    #[serde(rename = "requests-per-minute")]
    pub requests_per_minute: u32,

    /// Whole-request timeout (seconds)
    #[serde(rename = "timeout-secs", default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Connect timeout (seconds)
    #[serde(rename = "connect-timeout-secs", default = "default_connect_timeout_secs")]
    pub connect_timeout_secs: u64,

    /// Optional webhook URL for out-of-band failure alerts
    #[serde(rename = "alert-webhook")]
    pub alert_webhook: Option<String>,
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_connect_timeout_secs() -> u64 {
    10
}

/// Which slice of the catalog to sweep
#[derive(Debug, Clone, Deserialize)]
pub struct CatalogConfig {
    /// School names as they appear in bulk-listing URLs
    pub schools: Vec<String>,

    /// First year of the term enumeration
    #[serde(rename = "start-year")]
    pub start_year: i32,

    /// Season labels in within-year order
    #[serde(default = "default_seasons")]
    pub seasons: Vec<String>,
}

fn default_seasons() -> Vec<String> {
    ["Intersession", "Spring", "Summer", "Fall"]
        .map(String::from)
        .to_vec()
}

/// Output configuration
#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    /// Path to the CSV export file
    #[serde(rename = "csv-path")]
    pub csv_path: String,
}
