//! Shared types used across all modules.
//!
//! Review types, backend identities, requests and outcomes live here so
//! the dispatcher, the adapters and the renderers import from one place
//! rather than reaching into each other's internals.

pub mod outcome;

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use outcome::ReviewOutcome;

/// Errors in user input, raised before any backend is contacted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("no code to review: the snippet is empty")]
    EmptySnippet,

    #[error(
        "unknown review type '{0}'. Supported: bug_detection, syntax_revision, \
         style_suggestions, doc_strings_add"
    )]
    UnknownReviewType(String),
}

/// The four analysis modes, each selecting one prompt template.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReviewType {
    #[default]
    #[serde(rename = "bug_detection")]
    BugDetection,
    #[serde(rename = "syntax_revision")]
    SyntaxRevision,
    #[serde(rename = "style_suggestions")]
    StyleSuggestions,
    #[serde(rename = "doc_strings_add", alias = "docstring_addition")]
    DocstringAddition,
}

impl ReviewType {
    /// Every review type, in display order.
    pub const ALL: [ReviewType; 4] = [
        ReviewType::BugDetection,
        ReviewType::SyntaxRevision,
        ReviewType::StyleSuggestions,
        ReviewType::DocstringAddition,
    ];

    /// Wire tag, as submitted by the boundary layer.
    pub fn tag(self) -> &'static str {
        match self {
            ReviewType::BugDetection => "bug_detection",
            ReviewType::SyntaxRevision => "syntax_revision",
            ReviewType::StyleSuggestions => "style_suggestions",
            ReviewType::DocstringAddition => "doc_strings_add",
        }
    }

    /// Human-readable title, used as a report heading.
    pub fn title(self) -> &'static str {
        match self {
            ReviewType::BugDetection => "Bug Detection",
            ReviewType::SyntaxRevision => "Syntax Revision",
            ReviewType::StyleSuggestions => "Style Suggestions",
            ReviewType::DocstringAddition => "Docstring Addition",
        }
    }

    /// One-line description for `jarvis types`.
    pub fn description(self) -> &'static str {
        match self {
            ReviewType::BugDetection => "logic errors, unhandled cases and runtime hazards",
            ReviewType::SyntaxRevision => "syntax errors, invalid constructs and deprecated syntax",
            ReviewType::StyleSuggestions => "PEP 8 violations, naming and readability",
            ReviewType::DocstringAddition => "missing or incomplete Google-style docstrings",
        }
    }
}

impl fmt::Display for ReviewType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}

impl std::str::FromStr for ReviewType {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "bug_detection" => Ok(ReviewType::BugDetection),
            "syntax_revision" => Ok(ReviewType::SyntaxRevision),
            "style_suggestions" => Ok(ReviewType::StyleSuggestions),
            "doc_strings_add" | "docstring_addition" => Ok(ReviewType::DocstringAddition),
            _ => Err(ValidationError::UnknownReviewType(s.to_string())),
        }
    }
}

/// Which backend a dispatcher talks to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Remote HTTP API addressed by key and base URL.
    Cloud,
    /// Model server reachable on the local network.
    Local,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::Cloud => write!(f, "cloud"),
            BackendKind::Local => write!(f, "local"),
        }
    }
}

/// One snippet submitted for review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewRequest {
    pub snippet: String,
    pub review_type: ReviewType,
}

impl ReviewRequest {
    /// Build a request from raw boundary input, validating both fields.
    pub fn from_input(snippet: impl Into<String>, review_type: &str) -> Result<Self, ValidationError> {
        let request = Self {
            snippet: snippet.into(),
            review_type: review_type.parse()?,
        };
        request.validate()?;
        Ok(request)
    }

    /// Reject snippets with no reviewable content.
    pub fn validate(&self) -> Result<(), ValidationError> {
        ensure_snippet(&self.snippet)
    }
}

/// Empty and whitespace-only snippets are rejected.
pub fn ensure_snippet(snippet: &str) -> Result<(), ValidationError> {
    if snippet.trim().is_empty() {
        return Err(ValidationError::EmptySnippet);
    }
    Ok(())
}
