//! Fetch-minimization core
//!
//! This module contains the pure coverage extractor, the coverage
//! frontier, and the greedy set-cover scheduler that together decide
//! which detail requests are worth issuing.

mod extract;
mod frontier;
mod scheduler;

pub use extract::extract_details;
pub use frontier::CoverageFrontier;
pub use scheduler::{CoverOutcome, FetchScheduler, HistorySource};
