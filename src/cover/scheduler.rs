//! Fetch scheduler: greedy set cover over the coverage frontier
//!
//! Detail requests are the scarce resource. One section's cross-term
//! history usually spans every term that section was ever offered, so a
//! single request can retire many terms at once. The scheduler picks, at
//! each step, the section covering the most still-uncovered terms, with
//! one twist: a term whose frontier holds exactly one candidate has no
//! optionality left, so its section must be fetched eventually and picking
//! it early never wastes a request. Forced candidates therefore preempt
//! the global greedy choice, highest coverage first.
//!
//! A fetch that omits terms it was expected to cover triggers frontier
//! repair: the section stops being a candidate for those terms, and a term
//! with no candidates left is abandoned (its rows export with empty detail
//! fields). Every iteration shrinks the uncovered set or some frontier
//! set, so the loop terminates even when the remote's coverage promise
//! does not hold.

use std::collections::{BTreeMap, BTreeSet};

use crate::cover::extract::extract_details;
use crate::cover::frontier::CoverageFrontier;
use crate::model::{CourseCode, DetailRecord, SectionId, Skeleton, Term};
use crate::records::HistoryRecord;

/// Where the scheduler gets history data. The production source wraps the
/// resilient client; tests script it.
#[allow(async_fn_in_trait)]
pub trait HistorySource {
    /// Full cross-term history for (course, section). Hard failures are
    /// absorbed below this trait (pause/resume); an empty list means the
    /// remote answered with nothing extractable.
    async fn section_history(
        &mut self,
        course: &CourseCode,
        section: &SectionId,
    ) -> Vec<HistoryRecord>;

    /// Single-term detail for (course, section, term); the fallback when
    /// the bulk history call yields nothing.
    async fn term_detail(
        &mut self,
        course: &CourseCode,
        section: &SectionId,
        term: &Term,
    ) -> Vec<HistoryRecord>;
}

/// What one course's scheduling pass produced.
#[derive(Debug)]
pub struct CoverOutcome {
    /// Term → details, write-once (first successful fetch wins).
    pub details: BTreeMap<Term, DetailRecord>,

    /// Terms abandoned after every candidate section was disproved.
    pub uncoverable: BTreeSet<Term>,

    /// Detail requests issued (bulk and fallback).
    pub requests: usize,
}

/// Drives a `HistorySource` to cover one course's skeleton.
pub struct FetchScheduler<'a, S> {
    source: &'a mut S,
}

impl<'a, S: HistorySource> FetchScheduler<'a, S> {
    pub fn new(source: &'a mut S) -> Self {
        Self { source }
    }

    /// Runs the set-cover loop for one course.
    ///
    /// All mutable state (frontier, uncovered set, details map) is created
    /// here and owned by this pass alone.
    pub async fn cover(&mut self, course: &CourseCode, skeleton: &Skeleton) -> CoverOutcome {
        let mut frontier = CoverageFrontier::from_skeleton(skeleton);
        let mut uncovered: BTreeSet<Term> = skeleton.keys().cloned().collect();
        let mut details: BTreeMap<Term, DetailRecord> = BTreeMap::new();
        let mut uncoverable: BTreeSet<Term> = BTreeSet::new();
        let mut requests = 0usize;

        // A term listed with no sections at all can never be covered.
        uncovered.retain(|term| {
            if frontier.is_exhausted(term) {
                uncoverable.insert(term.clone());
                false
            } else {
                true
            }
        });

        while !uncovered.is_empty() {
            let Some(section) = select_section(&uncovered, &frontier) else {
                uncoverable.extend(std::mem::take(&mut uncovered));
                break;
            };

            tracing::debug!("Fetching {} section {} history", course, section);
            let records = self.source.section_history(course, &section).await;
            requests += 1;

            let mut batch = extract_details(&records);
            if batch.is_empty() {
                tracing::warn!(
                    "History for {} section {} yielded nothing; falling back to per-term fetches",
                    course,
                    section
                );
                batch = self
                    .fallback_sweep(course, &section, &uncovered, &frontier, &mut requests)
                    .await;
            }

            // Record every newly covered term. Terms already covered keep
            // their first-fetched details.
            for (term, detail) in &batch {
                if uncovered.remove(term) {
                    details.insert(term.clone(), detail.clone());
                }
            }

            // Frontier repair: the fetch was expected to cover every
            // uncovered term listing this section; any it omitted loses
            // the section as a candidate.
            let omitted: Vec<Term> = uncovered
                .iter()
                .filter(|term| frontier.contains(term, &section) && !batch.contains_key(term))
                .cloned()
                .collect();

            for term in omitted {
                frontier.remove_candidate(&term, &section);
                if frontier.is_exhausted(&term) {
                    tracing::error!(
                        "No sections left to try for {} {}; detail fields stay empty",
                        course,
                        term
                    );
                    uncovered.remove(&term);
                    uncoverable.insert(term);
                }
            }
        }

        CoverOutcome {
            details,
            uncoverable,
            requests,
        }
    }

    /// One single-term request per still-uncovered term that lists the
    /// section, soft failures allowed. Run when the bulk history call came
    /// back empty, so each term gets its individual chance before frontier
    /// repair removes the section.
    async fn fallback_sweep(
        &mut self,
        course: &CourseCode,
        section: &SectionId,
        uncovered: &BTreeSet<Term>,
        frontier: &CoverageFrontier,
        requests: &mut usize,
    ) -> BTreeMap<Term, DetailRecord> {
        let mut merged = BTreeMap::new();

        for term in uncovered.iter().filter(|t| frontier.contains(t, section)) {
            let records = self.source.term_detail(course, section, term).await;
            *requests += 1;

            for (found_term, detail) in extract_details(&records) {
                merged.entry(found_term).or_insert(detail);
            }
        }

        merged
    }
}

/// Picks the next section to fetch, or None when no uncovered term has a
/// candidate left.
///
/// Forced candidates (sole option of some term) preempt the global pool;
/// within a pool the highest coverage count wins, ties breaking to the
/// lexicographically smallest section id.
fn select_section(uncovered: &BTreeSet<Term>, frontier: &CoverageFrontier) -> Option<SectionId> {
    let mut counts: BTreeMap<SectionId, usize> = BTreeMap::new();
    let mut forced: BTreeSet<SectionId> = BTreeSet::new();

    for term in uncovered {
        let Some(candidates) = frontier.candidates(term) else {
            continue;
        };

        if candidates.len() == 1 {
            if let Some(only) = candidates.iter().next() {
                forced.insert(only.clone());
            }
        }

        for section in candidates {
            *counts.entry(section.clone()).or_insert(0) += 1;
        }
    }

    if !forced.is_empty() {
        best_by_count(forced.iter(), &counts)
    } else {
        best_by_count(counts.keys(), &counts)
    }
}

/// Highest count wins; iteration order is ascending, and only a strictly
/// greater count displaces the incumbent, so ties resolve to the smallest
/// section id.
fn best_by_count<'a>(
    pool: impl Iterator<Item = &'a SectionId>,
    counts: &BTreeMap<SectionId, usize>,
) -> Option<SectionId> {
    let mut best: Option<(&'a SectionId, usize)> = None;

    for section in pool {
        let count = counts.get(section).copied().unwrap_or(0);
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((section, count));
        }
    }

    best.map(|(section, _)| section.clone())
}
