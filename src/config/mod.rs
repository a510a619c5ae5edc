//! Configuration module for Catalog-Harvest
//!
//! This module handles loading, parsing, and validating TOML configuration
//! files.
//!
//! # Example
//!
//! ```no_run
//! use catalog_harvest::config::load_config;
//! use std::path::Path;
//!
//! let config = load_config(Path::new("config.toml")).unwrap();
//! println!("Sweeping {} schools", config.catalog.schools.len());
//! ```

mod parser;
mod types;
mod validation;

// Re-export types
pub use types::{ApiConfig, CatalogConfig, Config, OutputConfig};

// Re-export parser functions
pub use parser::load_config;
