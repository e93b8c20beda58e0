//! Prompt templates, one per review type.
//!
//! Templates are embedded via `include_str!` so they ship with the binary.
//! Each ends with an introduction line; the snippet is appended after it
//! verbatim.

use crate::models::{ReviewType, ValidationError};

const BUG_DETECTION_MD: &str = include_str!("templates/bug_detection.md");
const SYNTAX_REVISION_MD: &str = include_str!("templates/syntax_revision.md");
const STYLE_SUGGESTIONS_MD: &str = include_str!("templates/style_suggestions.md");
const DOC_STRINGS_ADD_MD: &str = include_str!("templates/doc_strings_add.md");

/// The instruction text for a review type, without the snippet.
pub fn template(review_type: ReviewType) -> &'static str {
    match review_type {
        ReviewType::BugDetection => BUG_DETECTION_MD,
        ReviewType::SyntaxRevision => SYNTAX_REVISION_MD,
        ReviewType::StyleSuggestions => STYLE_SUGGESTIONS_MD,
        ReviewType::DocstringAddition => DOC_STRINGS_ADD_MD,
    }
}

/// Build the full prompt for `snippet`.
pub fn build(snippet: &str, review_type: ReviewType) -> String {
    let template = template(review_type);
    let mut prompt = String::with_capacity(template.len() + snippet.len());
    prompt.push_str(template);
    prompt.push_str(snippet);
    prompt
}

/// Same as [`build`], for a raw review-type tag.
pub fn build_for_tag(snippet: &str, tag: &str) -> Result<String, ValidationError> {
    let review_type: ReviewType = tag.parse()?;
    Ok(build(snippet, review_type))
}
