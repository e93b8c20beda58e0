//! Tagged result of one review call.

use serde::Serialize;

use crate::providers::BackendError;

/// What came back from the backend: an annotated snippet or a handled failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome {
    Reviewed(String),
    Failed(BackendError),
}

impl ReviewOutcome {
    /// The text to show in the result area, whichever variant this is.
    pub fn text(&self) -> String {
        match self {
            ReviewOutcome::Reviewed(text) => text.clone(),
            ReviewOutcome::Failed(err) => err.to_string(),
        }
    }

    pub fn is_reviewed(&self) -> bool {
        matches!(self, ReviewOutcome::Reviewed(_))
    }

    /// The failure, if any.
    pub fn error(&self) -> Option<&BackendError> {
        match self {
            ReviewOutcome::Reviewed(_) => None,
            ReviewOutcome::Failed(err) => Some(err),
        }
    }
}

impl From<Result<String, BackendError>> for ReviewOutcome {
    fn from(result: Result<String, BackendError>) -> Self {
        match result {
            Ok(text) => ReviewOutcome::Reviewed(text),
            Err(err) => ReviewOutcome::Failed(err),
        }
    }
}

/// Serializable view used by the JSON renderer.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum OutcomeView {
    Reviewed { text: String },
    Failed { kind: &'static str, message: String },
}

impl From<&ReviewOutcome> for OutcomeView {
    fn from(outcome: &ReviewOutcome) -> Self {
        match outcome {
            ReviewOutcome::Reviewed(text) => OutcomeView::Reviewed { text: text.clone() },
            ReviewOutcome::Failed(err) => OutcomeView::Failed {
                kind: err.kind(),
                message: err.to_string(),
            },
        }
    }
}
