use crate::config::types::Config;
use crate::config::validation::validate;
use crate::ConfigError;
use std::path::Path;

/// Loads and parses a configuration file from the given path
///
/// # Arguments
///
/// * `path` - Path to the TOML configuration file
///
/// # Returns
///
/// * `Ok(Config)` - Successfully loaded and validated configuration
/// * `Err(ConfigError)` - Failed to load, parse, or validate the configuration
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    // Read the configuration file
    let content = std::fs::read_to_string(path)?;

    // Parse TOML
    let config: Config = toml::from_str(&content)?;

    // Validate the configuration
    validate(&config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn create_temp_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_valid_config() {
        let config_content = r#"
[api]
base-url = "https://sis.example.edu/api/classes"
requests-per-minute = 100

[catalog]
schools = ["Krieger School of Arts and Sciences"]
start-year = 2010

[output]
csv-path = "data/course_catalog.csv"
"#;

        let file = create_temp_config(config_content);
        let config = load_config(file.path()).unwrap();

        assert_eq!(config.api.base_url, "https://sis.example.edu/api/classes");
        assert_eq!(config.api.requests_per_minute, 100);
        assert_eq!(config.api.timeout_secs, 30);
        assert_eq!(config.catalog.schools.len(), 1);
        assert_eq!(config.catalog.start_year, 2010);
        // Seasons default to the full four-session year
        assert_eq!(config.catalog.seasons.len(), 4);
        assert_eq!(config.catalog.seasons[0], "Intersession");
    }

    #[test]
    fn test_load_config_with_invalid_path() {
        let result = load_config(Path::new("/nonexistent/config.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_invalid_toml() {
        let config_content = "this is not valid TOML {{{";
        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
    }

    #[test]
    fn test_load_config_with_validation_error() {
        let config_content = r#"
[api]
base-url = "https://sis.example.edu/api/classes"
requests-per-minute = 0

[catalog]
schools = ["Krieger School of Arts and Sciences"]
start-year = 2010

[output]
csv-path = "data/course_catalog.csv"
"#;

        let file = create_temp_config(config_content);
        let result = load_config(file.path());
        assert!(result.is_err());
        assert!(matches!(result.unwrap_err(), ConfigError::Validation(_)));
    }
}
