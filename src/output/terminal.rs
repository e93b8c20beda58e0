//! Terminal renderer: a styled heading, then the annotated code as-is.
//!
//! The reviewed text is never colored so it can be copied back into an
//! editor unchanged.

use colored::Colorize;

use crate::models::ReviewOutcome;
use crate::output::{OutputRenderer, ReviewReport};

/// Terminal output renderer.
pub struct TerminalRenderer;

impl OutputRenderer for TerminalRenderer {
    fn render(&self, report: &ReviewReport) -> String {
        let mut output = String::new();

        output.push_str(&format!(
            " {} {}\n",
            report.review_type.title().bold(),
            format!("via {} backend", report.backend).dimmed()
        ));
        output.push_str(&format!("{}\n", "───────────────────────────────────".dimmed()));

        match &report.outcome {
            ReviewOutcome::Reviewed(text) => {
                output.push_str(text);
                if !text.ends_with('\n') {
                    output.push('\n');
                }
            }
            ReviewOutcome::Failed(err) => {
                output.push_str(&format!(" {} {}\n", "✖".red().bold(), err.to_string().red()));
            }
        }

        output
    }
}
