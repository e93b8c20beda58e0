//! Output renderers: terminal and JSON.

pub mod json;
pub mod terminal;

use crate::models::{BackendKind, ReviewOutcome, ReviewType};

/// One finished review, ready to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewReport {
    pub review_type: ReviewType,
    pub backend: BackendKind,
    pub outcome: ReviewOutcome,
}

/// Trait for rendering a review result to an output format.
pub trait OutputRenderer {
    /// Render the report to a string.
    fn render(&self, report: &ReviewReport) -> String;
}
