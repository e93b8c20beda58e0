//! JSON output renderer.
//!
//! Outputs `{"review_type": ..., "backend": ..., "result": {"status": ...}}`.

use serde::Serialize;

use crate::models::outcome::OutcomeView;
use crate::models::{BackendKind, ReviewType};
use crate::output::{OutputRenderer, ReviewReport};

#[derive(Serialize)]
struct JsonReport {
    review_type: ReviewType,
    backend: BackendKind,
    result: OutcomeView,
}

/// JSON output renderer.
pub struct JsonRenderer;

impl OutputRenderer for JsonRenderer {
    fn render(&self, report: &ReviewReport) -> String {
        let output = JsonReport {
            review_type: report.review_type,
            backend: report.backend,
            result: OutcomeView::from(&report.outcome),
        };

        let mut rendered = serde_json::to_string_pretty(&output).unwrap_or_else(|_| "{}".to_string());
        rendered.push('\n');
        rendered
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ReviewOutcome;
    use crate::providers::BackendError;

    #[test]
    fn render_reviewed() {
        let report = ReviewReport {
            review_type: ReviewType::StyleSuggestions,
            backend: BackendKind::Cloud,
            outcome: ReviewOutcome::Reviewed("x = 1  # PEP8: E225 - missing whitespace".into()),
        };

        let rendered = JsonRenderer.render(&report);
        assert!(rendered.ends_with("}\n"));
        let parsed: serde_json::Value = serde_json::from_str(&rendered).unwrap();
        assert_eq!(parsed["review_type"], "style_suggestions");
        assert_eq!(parsed["backend"], "cloud");
        assert_eq!(parsed["result"]["status"], "reviewed");
        assert_eq!(parsed["result"]["text"], "x = 1  # PEP8: E225 - missing whitespace");
    }

    #[test]
    fn render_failed() {
        let report = ReviewReport {
            review_type: ReviewType::DocstringAddition,
            backend: BackendKind::Local,
            outcome: ReviewOutcome::Failed(BackendError::LocalApi("model 'x' not found".into())),
        };

        let parsed: serde_json::Value = serde_json::from_str(&JsonRenderer.render(&report)).unwrap();
        assert_eq!(parsed["review_type"], "doc_strings_add");
        assert_eq!(parsed["backend"], "local");
        assert_eq!(parsed["result"]["status"], "failed");
        assert_eq!(parsed["result"]["kind"], "local_api");
        assert_eq!(
            parsed["result"]["message"],
            "error from local model API: model 'x' not found"
        );
    }
}
