//! Coverage frontier
//!
//! For every term a course still needs covered, the set of sections
//! currently believed fetchable for it. Candidates only ever leave the
//! frontier: a removal models "this section's history does not actually
//! reach this term" after a fetch disproved the pairing.

use std::collections::{BTreeMap, BTreeSet};

use crate::model::{SectionId, Skeleton, Term};

/// Term → believed-fetchable sections. Always a non-strict subset of the
/// sections the skeleton lists for that term.
#[derive(Debug, Clone)]
pub struct CoverageFrontier {
    candidates: BTreeMap<Term, BTreeSet<SectionId>>,
}

impl CoverageFrontier {
    /// Initializes the frontier from a course skeleton: every listed
    /// section of a term starts out as a candidate for it.
    pub fn from_skeleton(skeleton: &Skeleton) -> Self {
        let candidates = skeleton
            .iter()
            .map(|(term, listings)| {
                let sections = listings.iter().map(|l| l.section_id()).collect();
                (term.clone(), sections)
            })
            .collect();
        Self { candidates }
    }

    /// The candidate sections for a term, if the term is known.
    pub fn candidates(&self, term: &Term) -> Option<&BTreeSet<SectionId>> {
        self.candidates.get(term)
    }

    /// Whether `section` is still a candidate for `term`.
    pub fn contains(&self, term: &Term, section: &SectionId) -> bool {
        self.candidates
            .get(term)
            .map_or(false, |sections| sections.contains(section))
    }

    /// Removes a disproved candidate. Returns true if it was present.
    pub fn remove_candidate(&mut self, term: &Term, section: &SectionId) -> bool {
        self.candidates
            .get_mut(term)
            .map_or(false, |sections| sections.remove(section))
    }

    /// Whether a term has no candidates left (unknown terms count as
    /// exhausted).
    pub fn is_exhausted(&self, term: &Term) -> bool {
        self.candidates
            .get(term)
            .map_or(true, |sections| sections.is_empty())
    }
}
