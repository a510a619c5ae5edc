//! Catalog assembly
//!
//! Everything around the fetch-minimization core: enumerating the term
//! plan, sweeping bulk listings into a skeleton, wiring the scheduler to
//! the remote API, and joining the results into export rows.

mod coordinator;
mod skeleton;
mod source;
mod terms;

pub use coordinator::{run_harvest, Coordinator};
pub use skeleton::build_catalog;
pub use source::CatalogApi;
pub use terms::{current_terms, enumerate_terms};
