//! Output module for the tabular export
//!
//! This module handles:
//! - Building CSV rows from skeleton listings and fetched details
//! - Writing the export file with backup rotation

mod csv_export;

pub use csv_export::{rotate_existing, section_row, CatalogRow, CsvExporter};
