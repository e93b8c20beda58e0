//! Local backend adapter (Ollama-style chat API).
//!
//! The server address is carried explicitly on the adapter; nothing is
//! read from or written to the process environment here.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::http::{body_excerpt, build_client, describe};
use super::{BackendError, ReviewBackend};
use crate::constants::LOCAL_CHAT_PATH;

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    message: Option<ChatResponseMessage>,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
}

/// Adapter for a model server on the local network.
#[derive(Debug)]
pub struct LocalBackend {
    client: Client,
    model: String,
    endpoint: String,
}

impl LocalBackend {
    pub fn new(
        model: impl Into<String>,
        base_url: &str,
        timeout: Duration,
    ) -> Result<Self, reqwest::Error> {
        Ok(Self {
            client: build_client(timeout)?,
            model: model.into(),
            endpoint: chat_endpoint(base_url),
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    /// Full chat URL requests are posted to.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, prompt: &str) -> Result<String, BackendError> {
        let request = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            stream: false,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&request)
            .send()
            .await
            .map_err(|e| BackendError::Unexpected(describe(e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| BackendError::Unexpected(describe(e)))?;

        if !status.is_success() {
            let detail = match serde_json::from_str::<ErrorBody>(&body) {
                Ok(parsed) => parsed.error,
                Err(_) => format!("{status}: {}", body_excerpt(&body)),
            };
            return Err(BackendError::LocalApi(detail));
        }

        let parsed: ChatResponse = serde_json::from_str(&body)
            .map_err(|e| BackendError::Unexpected(format!("invalid chat response: {e}")))?;

        parsed
            .message
            .and_then(|m| m.content)
            .ok_or(BackendError::NoReview)
    }
}

#[async_trait]
impl ReviewBackend for LocalBackend {
    fn name(&self) -> &'static str {
        "local"
    }

    async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
        tracing::debug!(endpoint = %self.endpoint, model = %self.model, "calling local model");

        let result = self.send(prompt).await;
        if let Err(ref err) = result {
            tracing::warn!(kind = err.kind(), "local model call failed: {err}");
        }
        result
    }
}

fn chat_endpoint(base_url: &str) -> String {
    format!("{}{LOCAL_CHAT_PATH}", base_url.trim_end_matches('/'))
}
