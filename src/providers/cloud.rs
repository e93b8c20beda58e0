//! Cloud backend adapter (Gemini-style `generateContent` API).
//!
//! One POST to the configured base URL with the API key as the `key`
//! query parameter and a `contents/parts/text` envelope. The generated
//! text is read from `candidates[0].content.parts[0].text`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;

use super::http::{body_excerpt, build_client, describe};
use super::{BackendError, ReviewBackend};

/// Request envelope.
#[derive(Serialize)]
struct CloudRequest<'a> {
    contents: Vec<CloudContent<'a>>,
}

#[derive(Serialize)]
struct CloudContent<'a> {
    parts: Vec<CloudPart<'a>>,
}

#[derive(Serialize)]
struct CloudPart<'a> {
    text: &'a str,
}

impl<'a> CloudRequest<'a> {
    fn single_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![CloudContent {
                parts: vec![CloudPart { text: prompt }],
            }],
        }
    }
}

/// Adapter for the cloud HTTP API.
pub struct CloudBackend {
    client: Client,
    api_key: String,
    base_url: String,
}

impl std::fmt::Debug for CloudBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CloudBackend")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl CloudBackend {
    /// Create an adapter posting to `base_url` with the given request timeout.
    pub fn new(
        api_key: impl Into<String>,
        base_url: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            api_key: api_key.into(),
            base_url: base_url.into(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[async_trait]
impl ReviewBackend for CloudBackend {
    fn name(&self) -> &'static str {
        "cloud"
    }

    async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        tracing::debug!(base_url = %self.base_url, prompt_len = prompt.len(), "calling cloud API");

        let result = self.send(prompt).await;
        if let Err(ref err) = result {
            tracing::warn!(kind = err.kind(), "cloud API call failed: {err}");
        }
        result
    }
}

impl CloudBackend {
    async fn send(&self, prompt: &str) -> Result<String, BackendError> {
        let response = self
            .client
            .post(&self.base_url)
            .query(&[("key", self.api_key.as_str())])
            .json(&CloudRequest::single_prompt(prompt))
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        let body = response.text().await.map_err(classify_transport)?;

        if status.is_client_error() || status.is_server_error() {
            return Err(BackendError::Http(format!("{status}: {}", body_excerpt(&body))));
        }

        extract_candidate_text(&body)
    }
}

/// Map a reqwest failure onto the cloud error categories.
fn classify_transport(err: reqwest::Error) -> BackendError {
    if err.is_timeout() {
        BackendError::Timeout
    } else if err.is_connect() {
        BackendError::Connection(describe(err))
    } else if err.is_decode() {
        BackendError::Parse(describe(err))
    } else {
        BackendError::Unexpected(describe(err))
    }
}

/// Pull the generated text out of a `generateContent` response body.
fn extract_candidate_text(body: &str) -> Result<String, BackendError> {
    let value: Value = serde_json::from_str(body)
        .map_err(|e| BackendError::Parse(format!("invalid JSON: {e}")))?;

    match value.get("candidates") {
        None | Some(Value::Null) => return Err(BackendError::NoReview),
        Some(Value::Array(candidates)) if candidates.is_empty() => {
            return Err(BackendError::NoReview);
        }
        Some(Value::Array(_)) => {}
        Some(other) => {
            return Err(BackendError::Parse(format!(
                "expected `candidates` to be an array, got {}",
                json_type(other)
            )));
        }
    }

    value
        .pointer("/candidates/0/content/parts/0/text")
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            BackendError::Parse("missing candidates[0].content.parts[0].text".to_string())
        })
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_serialization_matches_wire_shape() {
        let json = serde_json::to_value(CloudRequest::single_prompt("review me")).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"contents": [{"parts": [{"text": "review me"}]}]})
        );
    }

    #[test]
    fn extract_first_candidate() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"X"}]}},{"content":{"parts":[{"text":"Y"}]}}]}"#;
        assert_eq!(extract_candidate_text(body), Ok("X".to_string()));
    }

    #[test]
    fn extract_keeps_text_verbatim() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"  def f():\n    pass  # BUG: LOW - noop\n"}]}}]}"#;
        assert_eq!(
            extract_candidate_text(body).unwrap(),
            "  def f():\n    pass  # BUG: LOW - noop\n"
        );
    }

    #[test]
    fn empty_candidates_is_no_review() {
        assert_eq!(extract_candidate_text(r#"{"candidates":[]}"#), Err(BackendError::NoReview));
    }

    #[test]
    fn missing_candidates_is_no_review() {
        assert_eq!(
            extract_candidate_text(r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#),
            Err(BackendError::NoReview)
        );
        assert_eq!(extract_candidate_text(r#"{"candidates":null}"#), Err(BackendError::NoReview));
    }

    #[test]
    fn malformed_json_is_parse_error() {
        assert!(matches!(
            extract_candidate_text("not json {{"),
            Err(BackendError::Parse(_))
        ));
    }

    #[test]
    fn unexpected_shape_is_parse_error() {
        assert!(matches!(
            extract_candidate_text(r#"{"candidates":[{"content":{}}]}"#),
            Err(BackendError::Parse(_))
        ));
        let err = extract_candidate_text(r#"{"candidates":{"a":1}}"#).unwrap_err();
        assert!(err.to_string().contains("an object"));
    }

    #[test]
    fn debug_redacts_api_key() {
        let backend = CloudBackend::new("secret-key", "https://cloud.test", Duration::from_secs(1)).unwrap();
        let rendered = format!("{backend:?}");
        assert!(!rendered.contains("secret-key"));
        assert_eq!(backend.base_url(), "https://cloud.test");
    }
}
