//! Domain identifiers and the scheduler's output record
//!
//! Terms, sections and course codes are opaque labels from the remote
//! service. They are ordered only so that BTree-based collections iterate
//! deterministically; no arithmetic is ever performed on them.

use std::collections::BTreeMap;
use std::fmt;

use crate::records::SectionListing;

/// A semester/session label, e.g. "Fall 2023". The time axis for offerings.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Term(String);

impl Term {
    pub fn new(label: impl Into<String>) -> Self {
        Term(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Term {
    fn from(s: &str) -> Self {
        Term(s.to_string())
    }
}

/// A section label within a course, e.g. "01". Unique within a term but
/// recurring across terms.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SectionId(String);

impl SectionId {
    pub fn new(label: impl Into<String>) -> Self {
        SectionId(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SectionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SectionId {
    fn from(s: &str) -> Self {
        SectionId(s.to_string())
    }
}

/// Identifies a course across all terms, e.g. "AS.171.101". The unit of
/// scheduling: the set-cover pass runs once per course code.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CourseCode(String);

impl CourseCode {
    pub fn new(code: impl Into<String>) -> Self {
        CourseCode(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The code as it appears in detail-endpoint paths: dots stripped.
    pub fn path_form(&self) -> String {
        self.0.replace('.', "")
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CourseCode {
    fn from(s: &str) -> Self {
        CourseCode(s.to_string())
    }
}

/// The expensive-to-fetch descriptive data attached to a section's term.
///
/// Requisite fields hold the raw JSON text of the remote's requisite
/// arrays, defaulting to "[]" when absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailRecord {
    pub description: String,
    pub prerequisites: String,
    pub corequisites: String,
}

/// Per-course listing gathered by the term sweep before detail enrichment.
/// Read-only to the scheduler.
pub type Skeleton = BTreeMap<Term, Vec<SectionListing>>;

/// The full sweep result: every course's skeleton.
pub type Catalog = BTreeMap<CourseCode, Skeleton>;
