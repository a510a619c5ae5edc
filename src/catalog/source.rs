//! The API-backed data source
//!
//! Owns endpoint construction for the three remote calls and the boundary
//! parsing of their payloads. School and term labels contain spaces, so
//! they travel as percent-encoded path segments; course codes lose their
//! dots in detail paths.

use url::Url;

use crate::client::{FetchOutcome, ResilientClient};
use crate::cover::HistorySource;
use crate::model::{CourseCode, SectionId, Term};
use crate::records::{parse_history, parse_listings, HistoryRecord, SectionListing};
use crate::{HarvestError, Result};

/// Remote catalog API bound to one resilient client.
pub struct CatalogApi {
    client: ResilientClient,
    base: Url,
}

impl CatalogApi {
    /// Binds a client to a base URL. The URL must be able to carry
    /// appended path segments.
    pub fn new(base_url: &str, client: ResilientClient) -> Result<Self> {
        let base = Url::parse(base_url)?;
        if base.cannot_be_a_base() {
            return Err(HarvestError::Endpoint {
                context: "base URL".to_string(),
                message: format!("'{}' cannot carry path segments", base_url),
            });
        }
        Ok(Self { client, base })
    }

    /// Bulk listing: every section of a school in a term. Soft failures
    /// are disabled; a missing school/term page is not an expected shape.
    pub async fn list_sections(&mut self, school: &str, term: &Term) -> Vec<SectionListing> {
        let url = self.endpoint(&[school, term.as_str()]);
        match self.client.request(url, false).await {
            FetchOutcome::Payload(payload) => parse_listings(&payload),
            FetchOutcome::NoData => Vec::new(),
        }
    }

    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base.clone();
        // new() rejected cannot-be-a-base URLs, so segments always attach
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}

impl HistorySource for CatalogApi {
    async fn section_history(
        &mut self,
        course: &CourseCode,
        section: &SectionId,
    ) -> Vec<HistoryRecord> {
        let path = format!("{}{}", course.path_form(), section.as_str());
        let url = self.endpoint(&[&path]);

        match self.client.request(url, false).await {
            FetchOutcome::Payload(payload) => parse_history(&payload),
            FetchOutcome::NoData => Vec::new(),
        }
    }

    async fn term_detail(
        &mut self,
        course: &CourseCode,
        section: &SectionId,
        term: &Term,
    ) -> Vec<HistoryRecord> {
        let path = format!("{}{}", course.path_form(), section.as_str());
        let url = self.endpoint(&[&path, term.as_str()]);

        // The fallback endpoint is allowed to answer with a benign
        // absence; the scheduler treats that as zero coverage for the
        // term, not an outage.
        match self.client.request(url, true).await {
            FetchOutcome::Payload(payload) => parse_history(&payload),
            FetchOutcome::NoData => Vec::new(),
        }
    }
}
