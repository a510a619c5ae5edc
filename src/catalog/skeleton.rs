//! Term sweep: building the catalog skeleton
//!
//! Phase 1 of a harvest. One bulk-listing call per (term, school) pair
//! collects the lightweight section records, grouped by course so the
//! set-cover pass can see each course's full term history at once.

use crate::catalog::source::CatalogApi;
use crate::config::CatalogConfig;
use crate::model::{Catalog, CourseCode, Term};

/// Sweeps every configured school across the term plan.
///
/// Sections without a course code are skipped; sections are grouped under
/// the sweep term (the term used in the request), not any term string the
/// record itself carries.
pub async fn build_catalog(
    api: &mut CatalogApi,
    config: &CatalogConfig,
    terms: &[Term],
) -> Catalog {
    let mut catalog = Catalog::new();

    for term in terms {
        tracing::info!("Scanning {}...", term);

        for school in &config.schools {
            let listings = api.list_sections(school, term).await;
            let total = listings.len();
            let mut kept = 0usize;

            for listing in listings {
                let Some(code) = listing
                    .course_code
                    .as_deref()
                    .filter(|code| !code.is_empty())
                else {
                    continue;
                };

                catalog
                    .entry(CourseCode::from(code))
                    .or_default()
                    .entry(term.clone())
                    .or_default()
                    .push(listing);
                kept += 1;
            }

            tracing::debug!(
                "{} / {}: kept {} of {} sections",
                school,
                term,
                kept,
                total
            );
        }
    }

    catalog
}
