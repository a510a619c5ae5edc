//! Catalog-Harvest: a course-catalog history harvester
//!
//! This crate collects historical course-catalog records from a rate-limited
//! remote API and assembles them into a flat CSV export. Detail records are
//! expensive to fetch, so a greedy set-cover scheduler picks the fewest
//! per-section history requests that still cover every term a course was
//! offered in.

pub mod catalog;
pub mod client;
pub mod config;
pub mod cover;
pub mod model;
pub mod output;
pub mod records;

use thiserror::Error;

/// Main error type for Catalog-Harvest operations
#[derive(Debug, Error)]
pub enum HarvestError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Missing credential: environment variable {0} is not set")]
    MissingCredential(&'static str),

    #[error("HTTP client error: {0}")]
    Reqwest(#[from] reqwest::Error),

    #[error("URL parse error: {0}")]
    UrlParse(#[from] url::ParseError),

    #[error("Invalid API endpoint for {context}: {message}")]
    Endpoint { context: String, message: String },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Invalid URL in config: {0}")]
    InvalidUrl(String),
}

/// Result type alias for Catalog-Harvest operations
pub type Result<T> = std::result::Result<T, HarvestError>;

/// Result type alias for configuration operations
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

// Re-export commonly used types
pub use client::{FetchOutcome, ResilientClient};
pub use config::Config;
pub use cover::{extract_details, CoverOutcome, FetchScheduler};
pub use model::{CourseCode, DetailRecord, SectionId, Term};
