//! Harvest coordinator - main pipeline orchestration
//!
//! Runs the two phases of a harvest:
//! 1. Term sweep: bulk-listing calls build the catalog skeleton.
//! 2. Detail fetching: per course, the set-cover scheduler fills a details
//!    map, and skeleton rows joined with it stream into the CSV export.

use std::path::Path;

use crate::catalog::skeleton::build_catalog;
use crate::catalog::source::CatalogApi;
use crate::catalog::terms::current_terms;
use crate::client::{alert_from_config, ResilientClient, StdinResume};
use crate::config::Config;
use crate::cover::FetchScheduler;
use crate::output::{section_row, CsvExporter};
use crate::Result;

/// Main harvest coordinator structure
pub struct Coordinator {
    config: Config,
    api: CatalogApi,
    exporter: CsvExporter,
}

impl Coordinator {
    /// Creates a coordinator for interactive use: credential from the
    /// environment, operator resume on the terminal, alerts per config.
    ///
    /// Fails before any request is issued if the credential is missing.
    pub fn new(config: Config) -> Result<Self> {
        let alerts = alert_from_config(&config.api);
        let client = ResilientClient::from_env(&config.api, alerts, Box::new(StdinResume))?;
        Self::with_client(config, client)
    }

    /// Creates a coordinator around an explicit client (tests inject a
    /// non-interactive one).
    pub fn with_client(config: Config, client: ResilientClient) -> Result<Self> {
        let api = CatalogApi::new(&config.api.base_url, client)?;
        let exporter = CsvExporter::create(Path::new(&config.output.csv_path))?;
        Ok(Self {
            config,
            api,
            exporter,
        })
    }

    /// Runs the full harvest.
    pub async fn run(&mut self) -> Result<()> {
        let terms = current_terms(&self.config.catalog);
        self.run_over_terms(&terms).await
    }

    /// Runs the harvest over an explicit term plan.
    pub async fn run_over_terms(&mut self, terms: &[crate::model::Term]) -> Result<()> {
        tracing::info!(
            "Phase 1: term sweep ({} terms x {} schools)",
            terms.len(),
            self.config.catalog.schools.len()
        );
        let catalog = build_catalog(&mut self.api, &self.config.catalog, terms).await;
        tracing::info!("Phase 1 complete: {} unique courses", catalog.len());

        tracing::info!("Phase 2: detail fetching with set-cover selection");
        let course_count = catalog.len();
        let mut rows_written = 0usize;
        let mut detail_requests = 0usize;
        let mut uncoverable_terms = 0usize;

        for (i, (course, skeleton)) in catalog.iter().enumerate() {
            let outcome = FetchScheduler::new(&mut self.api)
                .cover(course, skeleton)
                .await;

            detail_requests += outcome.requests;
            uncoverable_terms += outcome.uncoverable.len();

            for (term, listings) in skeleton {
                let details = outcome.details.get(term);
                for listing in listings {
                    self.exporter
                        .write_row(&section_row(course, term, listing, details))?;
                    rows_written += 1;
                }
            }

            if (i + 1) % 25 == 0 {
                tracing::info!(
                    "Progress: {}/{} courses, {} detail requests, {} rows",
                    i + 1,
                    course_count,
                    detail_requests,
                    rows_written
                );
            }
        }

        self.exporter.flush()?;

        tracing::info!(
            "Harvest complete: {} courses, {} rows, {} detail requests, {} uncoverable terms",
            course_count,
            rows_written,
            detail_requests,
            uncoverable_terms
        );

        Ok(())
    }
}

/// Runs the full harvest for a configuration.
pub async fn run_harvest(config: Config) -> Result<()> {
    let mut coordinator = Coordinator::new(config)?;
    coordinator.run().await
}
