//! Search-summary pipeline: validate, search, condense, prompt, invoke, assemble.

pub mod condense;
pub mod handler;

pub use condense::condense;
pub use handler::{SearchDefaults, SearchSummaryHandler, SummaryFailure};
