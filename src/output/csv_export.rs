//! CSV export with backup rotation
//!
//! One row per (course, term, section). Detail fields come from the
//! scheduler's details map where coverage succeeded and stay empty
//! otherwise. An existing export is renamed with a timestamp suffix, never
//! overwritten.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;

use crate::model::{CourseCode, DetailRecord, Term};
use crate::records::SectionListing;
use crate::Result;

/// One export row. Column names match the remote's vocabulary so the file
/// joins cleanly against other exports from the same service.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogRow {
    #[serde(rename = "Term")]
    pub term: String,

    #[serde(rename = "CourseCode")]
    pub course_code: String,

    #[serde(rename = "SectionName")]
    pub section_name: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Instructors")]
    pub instructors: String,

    #[serde(rename = "Credits")]
    pub credits: String,

    #[serde(rename = "Status")]
    pub status: String,

    #[serde(rename = "Level")]
    pub level: String,

    #[serde(rename = "Area")]
    pub area: String,

    #[serde(rename = "Building")]
    pub building: String,

    #[serde(rename = "Location")]
    pub location: String,

    #[serde(rename = "InstructionMethod")]
    pub instruction_method: String,

    #[serde(rename = "MaxSeats")]
    pub max_seats: String,

    #[serde(rename = "OpenSeats")]
    pub open_seats: String,

    #[serde(rename = "DOW")]
    pub days_of_week: String,

    #[serde(rename = "DOWSort")]
    pub dow_sort: String,

    #[serde(rename = "Description")]
    pub description: String,

    #[serde(rename = "Prereq_JSON")]
    pub prereq_json: String,

    #[serde(rename = "CoReq_JSON")]
    pub coreq_json: String,
}

/// Joins one skeleton listing with its term's details (if covered).
pub fn section_row(
    course: &CourseCode,
    term: &Term,
    listing: &SectionListing,
    details: Option<&DetailRecord>,
) -> CatalogRow {
    let (description, prereq_json, coreq_json) = match details {
        Some(d) => (
            d.description.clone(),
            d.prerequisites.clone(),
            d.corequisites.clone(),
        ),
        None => (String::new(), "[]".to_string(), "[]".to_string()),
    };

    CatalogRow {
        term: term.as_str().to_string(),
        course_code: course.as_str().to_string(),
        section_name: listing.section_name.clone(),
        title: listing.title.clone(),
        instructors: listing.instructors.clone(),
        credits: listing.credits.clone(),
        status: listing.status.clone(),
        level: listing.level.clone(),
        area: listing.areas.clone(),
        building: listing.building.clone(),
        location: listing.location.clone(),
        instruction_method: listing.instruction_method.clone(),
        max_seats: listing.max_seats.clone(),
        open_seats: listing.open_seats.clone(),
        days_of_week: listing.days_of_week.clone(),
        dow_sort: listing.dow_sort.clone(),
        description,
        prereq_json,
        coreq_json,
    }
}

/// Streams rows into a CSV file, headers first.
pub struct CsvExporter {
    writer: csv::Writer<File>,
}

impl CsvExporter {
    /// Opens the export file, creating parent directories and rotating a
    /// pre-existing file out of the way first.
    pub fn create(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        if let Some(backup) = rotate_existing(path)? {
            tracing::info!("Existing export moved to {}", backup.display());
        }

        let writer = csv::Writer::from_path(path)?;
        Ok(Self { writer })
    }

    /// Appends one row; the header row is emitted automatically before the
    /// first record.
    pub fn write_row(&mut self, row: &CatalogRow) -> Result<()> {
        self.writer.serialize(row)?;
        Ok(())
    }

    pub fn flush(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Renames an existing file to `{stem}.{timestamp}.bak{.ext}`.
///
/// Returns the backup path, or None if there was nothing to rotate.
pub fn rotate_existing(path: &Path) -> io::Result<Option<PathBuf>> {
    if !path.exists() {
        return Ok(None);
    }

    let file_name = match path.file_name() {
        Some(name) => name.to_string_lossy().into_owned(),
        None => return Ok(None),
    };

    let timestamp = Local::now().format("%Y%m%d-%H%M%S");
    let backup_name = match file_name.rsplit_once('.') {
        Some((stem, ext)) => format!("{}.{}.bak.{}", stem, timestamp, ext),
        None => format!("{}.{}.bak", file_name, timestamp),
    };

    let backup = path.with_file_name(backup_name);
    fs::rename(path, &backup)?;
    Ok(Some(backup))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn listing(section: &str, title: &str) -> SectionListing {
        SectionListing {
            section_name: section.to_string(),
            title: title.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_section_row_without_details_is_empty() {
        let row = section_row(
            &CourseCode::from("AS.171.101"),
            &Term::from("Fall 2023"),
            &listing("01", "General Physics"),
            None,
        );

        assert_eq!(row.course_code, "AS.171.101");
        assert_eq!(row.description, "");
        assert_eq!(row.prereq_json, "[]");
        assert_eq!(row.coreq_json, "[]");
    }

    #[test]
    fn test_section_row_with_details() {
        let details = DetailRecord {
            description: "Mechanics.".to_string(),
            prerequisites: r#"[{"Description":"None"}]"#.to_string(),
            corequisites: "[]".to_string(),
        };

        let row = section_row(
            &CourseCode::from("AS.171.101"),
            &Term::from("Fall 2023"),
            &listing("01", "General Physics"),
            Some(&details),
        );

        assert_eq!(row.description, "Mechanics.");
        assert_eq!(row.prereq_json, r#"[{"Description":"None"}]"#);
    }

    #[test]
    fn test_exporter_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.csv");

        let mut exporter = CsvExporter::create(&path).unwrap();
        exporter
            .write_row(&section_row(
                &CourseCode::from("AS.171.101"),
                &Term::from("Fall 2023"),
                &listing("01", "General Physics"),
                None,
            ))
            .unwrap();
        exporter.flush().unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let mut lines = content.lines();
        let header = lines.next().unwrap();
        assert!(header.starts_with("Term,CourseCode,SectionName"));
        assert!(header.ends_with("Description,Prereq_JSON,CoReq_JSON"));
        assert!(lines.next().unwrap().contains("General Physics"));
    }

    #[test]
    fn test_exporter_creates_parent_dirs() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("data").join("catalog.csv");

        let exporter = CsvExporter::create(&path);
        assert!(exporter.is_ok());
        assert!(path.parent().unwrap().is_dir());
    }

    #[test]
    fn test_rotate_existing_preserves_old_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.csv");
        fs::write(&path, "old content").unwrap();

        let backup = rotate_existing(&path).unwrap().unwrap();

        assert!(!path.exists());
        assert!(backup.exists());
        assert_eq!(fs::read_to_string(&backup).unwrap(), "old content");

        let backup_name = backup.file_name().unwrap().to_string_lossy().into_owned();
        assert!(backup_name.starts_with("catalog."));
        assert!(backup_name.ends_with(".bak.csv"));
    }

    #[test]
    fn test_rotate_missing_file_is_noop() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog.csv");
        assert!(rotate_existing(&path).unwrap().is_none());
    }

    #[test]
    fn test_rotate_extensionless_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("catalog");
        fs::write(&path, "x").unwrap();

        let backup = rotate_existing(&path).unwrap().unwrap();
        let backup_name = backup.file_name().unwrap().to_string_lossy().into_owned();
        assert!(backup_name.starts_with("catalog."));
        assert!(backup_name.ends_with(".bak"));
    }
}
