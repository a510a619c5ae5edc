use crate::config::types::{ApiConfig, CatalogConfig, Config, OutputConfig};
use crate::ConfigError;
use url::Url;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_api_config(&config.api)?;
    validate_catalog_config(&config.catalog)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates API configuration
fn validate_api_config(config: &ApiConfig) -> Result<(), ConfigError> {
    let base = Url::parse(&config.base_url)
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid base-url: {}", e)))?;

    if base.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "base-url must use HTTPS scheme, got '{}'",
            base.scheme()
        )));
    }

    if base.cannot_be_a_base() {
        return Err(ConfigError::InvalidUrl(format!(
            "base-url cannot serve as a base URL: '{}'",
            config.base_url
        )));
    }

    if config.requests_per_minute < 1 {
        return Err(ConfigError::Validation(format!(
            "requests-per-minute must be >= 1, got {}",
            config.requests_per_minute
        )));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout-secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if let Some(webhook) = &config.alert_webhook {
        Url::parse(webhook)
            .map_err(|e| ConfigError::InvalidUrl(format!("Invalid alert-webhook: {}", e)))?;
    }

    Ok(())
}

/// Validates catalog configuration
fn validate_catalog_config(config: &CatalogConfig) -> Result<(), ConfigError> {
    if config.schools.is_empty() {
        return Err(ConfigError::Validation(
            "at least one school must be configured".to_string(),
        ));
    }

    for school in &config.schools {
        if school.trim().is_empty() {
            return Err(ConfigError::Validation(
                "school names cannot be empty".to_string(),
            ));
        }
    }

    if config.start_year < 1900 {
        return Err(ConfigError::Validation(format!(
            "start-year must be a plausible calendar year, got {}",
            config.start_year
        )));
    }

    if config.seasons.is_empty() {
        return Err(ConfigError::Validation(
            "at least one season must be configured".to_string(),
        ));
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.csv_path.is_empty() {
        return Err(ConfigError::Validation(
            "csv-path cannot be empty".to_string(),
        ));
    }

    Ok(())
}
