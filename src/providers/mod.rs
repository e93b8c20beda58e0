//! ReviewBackend trait and the two LLM adapters.
//!
//! Each adapter performs exactly one network call per prompt and turns
//! every failure into a [`BackendError`], so callers never see a raw
//! transport error.

pub mod cloud;
pub mod http;
pub mod local;

use async_trait::async_trait;
use thiserror::Error;

pub use cloud::CloudBackend;
pub use local::LocalBackend;

/// Failures from a single backend call.
///
/// The `Display` text is the message shown to the user in place of a
/// review; [`BackendError::kind`] is the stable machine-readable tag.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    #[error("HTTP error from cloud API: {0}")]
    Http(String),

    #[error("connection error to cloud API: {0}")]
    Connection(String),

    #[error("cloud API call timed out")]
    Timeout,

    #[error("response parsing error: {0}")]
    Parse(String),

    #[error("no review generated")]
    NoReview,

    #[error("error from local model API: {0}")]
    LocalApi(String),

    #[error("unexpected error: {0}")]
    Unexpected(String),
}

impl BackendError {
    /// Stable tag for structured output.
    pub fn kind(&self) -> &'static str {
        match self {
            BackendError::Http(_) => "http",
            BackendError::Connection(_) => "connection",
            BackendError::Timeout => "timeout",
            BackendError::Parse(_) => "parse",
            BackendError::NoReview => "no_review",
            BackendError::LocalApi(_) => "local_api",
            BackendError::Unexpected(_) => "unexpected",
        }
    }
}

/// One LLM backend able to complete a fully built prompt.
#[async_trait]
pub trait ReviewBackend: Send + Sync {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Send `prompt` and return the generated text verbatim.
    async fn complete(&self, prompt: &str) -> Result<String, BackendError>;
}
