//! Remote record shapes, validated once at the boundary
//!
//! The remote service speaks loosely-typed JSON and is known to emit
//! partial or malformed entries. Every payload passes through the parsers
//! here exactly once: malformed array entries are dropped with a debug log,
//! and payloads that are not arrays at all (the service answers
//! `{"Message": "No records found"}` for absent records) parse to an empty
//! list. Past this module, every field has a definite value.

use serde::Deserialize;
use serde_json::Value;

use crate::model::{SectionId, Term};

/// One section record from the bulk listing endpoint.
///
/// Every string field defaults to empty when the service omits it; only
/// `Term` and `OfferingName` stay optional because records missing either
/// are unusable and are filtered during the sweep.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionListing {
    #[serde(rename = "Term")]
    pub term: Option<String>,

    #[serde(rename = "OfferingName")]
    pub course_code: Option<String>,

    #[serde(rename = "SectionName", default)]
    pub section_name: String,

    #[serde(rename = "Title", default)]
    pub title: String,

    #[serde(rename = "InstructorsFullName", default)]
    pub instructors: String,

    #[serde(rename = "Credits", default)]
    pub credits: String,

    #[serde(rename = "Status", default)]
    pub status: String,

    #[serde(rename = "Level", default)]
    pub level: String,

    #[serde(rename = "Areas", default)]
    pub areas: String,

    #[serde(rename = "Building", default)]
    pub building: String,

    #[serde(rename = "Location", default)]
    pub location: String,

    #[serde(rename = "InstructionMethod", default)]
    pub instruction_method: String,

    #[serde(rename = "MaxSeats", default)]
    pub max_seats: String,

    #[serde(rename = "OpenSeats", default)]
    pub open_seats: String,

    #[serde(rename = "DOW", default)]
    pub days_of_week: String,

    #[serde(rename = "DOWSort", default)]
    pub dow_sort: String,
}

impl SectionListing {
    pub fn section_id(&self) -> SectionId {
        SectionId::new(self.section_name.clone())
    }
}

/// One per-term record from the section-history endpoints, optionally
/// carrying the detail sub-record the scheduler is after.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryRecord {
    #[serde(rename = "Term")]
    pub term: Option<String>,

    #[serde(rename = "SectionDetails", default)]
    pub section_details: Vec<SectionDetails>,
}

impl HistoryRecord {
    pub fn term(&self) -> Option<Term> {
        self.term.as_deref().map(Term::from)
    }
}

/// The detail sub-record: description plus requisite blobs.
///
/// Requisites are kept as raw JSON values so their exact text survives the
/// round trip into the export.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SectionDetails {
    #[serde(rename = "Description", default)]
    pub description: String,

    #[serde(rename = "Prerequisites", default)]
    pub prerequisites: Vec<Value>,

    #[serde(rename = "CoRequisites", default)]
    pub corequisites: Vec<Value>,
}

/// Parses a bulk-listing payload into section records.
pub fn parse_listings(payload: &Value) -> Vec<SectionListing> {
    parse_array(payload, "section listing")
}

/// Parses a section-history payload into per-term records.
pub fn parse_history(payload: &Value) -> Vec<HistoryRecord> {
    parse_array(payload, "history record")
}

/// Shared lenient array parser. Non-array payloads (including the
/// `{"Message": ...}` absence shape) yield an empty list; entries that fail
/// to deserialize are dropped, not errors.
fn parse_array<T: serde::de::DeserializeOwned>(payload: &Value, kind: &str) -> Vec<T> {
    let Some(items) = payload.as_array() else {
        if payload.get("Message").is_some() {
            tracing::debug!("Payload is an absence message, treating as empty");
        } else {
            tracing::debug!("Payload is not an array, treating as empty");
        }
        return Vec::new();
    };

    items
        .iter()
        .filter_map(|item| match serde_json::from_value(item.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!("Dropping malformed {}: {}", kind, e);
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_listings_basic() {
        let payload = json!([
            {
                "Term": "Fall 2023",
                "OfferingName": "AS.171.101",
                "SectionName": "01",
                "Title": "General Physics",
                "Credits": "4.00"
            }
        ]);

        let listings = parse_listings(&payload);
        assert_eq!(listings.len(), 1);
        assert_eq!(listings[0].term.as_deref(), Some("Fall 2023"));
        assert_eq!(listings[0].course_code.as_deref(), Some("AS.171.101"));
        assert_eq!(listings[0].section_name, "01");
        assert_eq!(listings[0].credits, "4.00");
        // Omitted fields default to empty
        assert_eq!(listings[0].building, "");
    }

    #[test]
    fn test_parse_listings_message_shape_is_empty() {
        let payload = json!({"Message": "No records found"});
        assert!(parse_listings(&payload).is_empty());
    }

    #[test]
    fn test_parse_listings_non_array_is_empty() {
        let payload = json!("unexpected");
        assert!(parse_listings(&payload).is_empty());
    }

    #[test]
    fn test_parse_history_with_details() {
        let payload = json!([
            {
                "Term": "Fall 2023",
                "SectionDetails": [
                    {
                        "Description": "An introduction.",
                        "Prerequisites": [{"Description": "AS.110.106"}],
                        "CoRequisites": []
                    }
                ]
            },
            {
                "Term": "Spring 2024",
                "SectionDetails": []
            }
        ]);

        let records = parse_history(&payload);
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].term(), Some(Term::from("Fall 2023")));
        assert_eq!(records[0].section_details.len(), 1);
        assert_eq!(records[0].section_details[0].description, "An introduction.");
        assert!(records[1].section_details.is_empty());
    }

    #[test]
    fn test_parse_history_drops_malformed_entries() {
        // Second entry has a non-string Term and cannot deserialize
        let payload = json!([
            {"Term": "Fall 2023"},
            {"Term": 2023},
            {"Term": "Spring 2024"}
        ]);

        let records = parse_history(&payload);
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn test_history_record_missing_term() {
        let payload = json!([{"SectionDetails": []}]);
        let records = parse_history(&payload);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].term(), None);
    }
}
