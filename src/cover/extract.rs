//! Coverage extractor
//!
//! Pure function from one raw history response to a Term → DetailRecord
//! mapping. No I/O, deterministic for a fixed input.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::model::{DetailRecord, Term};
use crate::records::HistoryRecord;

/// Extracts per-term details from a section-history response.
///
/// One entry per record carrying a Term and a non-empty detail payload.
/// Records missing a Term are dropped silently (the remote emits partial
/// entries); duplicate Terms resolve to the last record seen, which is
/// deterministic for a fixed input.
pub fn extract_details(records: &[HistoryRecord]) -> BTreeMap<Term, DetailRecord> {
    let mut mapping = BTreeMap::new();

    for record in records {
        let Some(term) = record.term() else { continue };
        let Some(details) = record.section_details.first() else {
            continue;
        };

        mapping.insert(
            term,
            DetailRecord {
                description: details.description.clone(),
                prerequisites: requisites_json(&details.prerequisites),
                corequisites: requisites_json(&details.corequisites),
            },
        );
    }

    mapping
}

/// Serializes a requisite array back to JSON text, "[]" when empty.
fn requisites_json(requisites: &[Value]) -> String {
    if requisites.is_empty() {
        return "[]".to_string();
    }
    match serde_json::to_string(requisites) {
        Ok(text) => text,
        Err(e) => {
            tracing::debug!("Failed to serialize requisites: {}", e);
            "[]".to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::parse_history;
    use serde_json::json;

    fn history_payload() -> Vec<HistoryRecord> {
        parse_history(&json!([
            {
                "Term": "Fall 2023",
                "SectionDetails": [
                    {
                        "Description": "Waves and optics.",
                        "Prerequisites": [{"Description": "AS.171.101"}],
                        "CoRequisites": []
                    }
                ]
            },
            {
                "Term": "Spring 2024",
                "SectionDetails": [
                    {"Description": "Waves and optics, spring run."}
                ]
            },
            // No term: dropped
            {
                "SectionDetails": [{"Description": "orphan"}]
            },
            // No details: dropped
            {
                "Term": "Summer 2024"
            }
        ]))
    }

    #[test]
    fn test_extracts_one_entry_per_termed_record() {
        let mapping = extract_details(&history_payload());
        assert_eq!(mapping.len(), 2);

        let fall = &mapping[&Term::from("Fall 2023")];
        assert_eq!(fall.description, "Waves and optics.");
        assert_eq!(fall.prerequisites, r#"[{"Description":"AS.171.101"}]"#);
        assert_eq!(fall.corequisites, "[]");

        let spring = &mapping[&Term::from("Spring 2024")];
        assert_eq!(spring.prerequisites, "[]");
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let records = history_payload();
        assert_eq!(extract_details(&records), extract_details(&records));
    }

    #[test]
    fn test_duplicate_terms_last_seen_wins() {
        let records = parse_history(&json!([
            {
                "Term": "Fall 2023",
                "SectionDetails": [{"Description": "first"}]
            },
            {
                "Term": "Fall 2023",
                "SectionDetails": [{"Description": "second"}]
            }
        ]));

        let mapping = extract_details(&records);
        assert_eq!(mapping.len(), 1);
        assert_eq!(mapping[&Term::from("Fall 2023")].description, "second");
    }

    #[test]
    fn test_empty_input_empty_output() {
        assert!(extract_details(&[]).is_empty());
    }
}
