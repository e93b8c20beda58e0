//! HTTP plumbing shared by both adapters.

use std::time::Duration;

use reqwest::Client;

/// Maximum number of characters of a response body quoted in an error message.
pub const BODY_EXCERPT_LEN: usize = 500;

/// Build the client an adapter keeps for its whole lifetime.
///
/// The timeout covers the full request, from connect to the last body byte.
pub fn build_client(timeout: Duration) -> Result<Client, reqwest::Error> {
    Client::builder()
        .timeout(timeout)
        .user_agent(concat!("jarvis/", env!("CARGO_PKG_VERSION")))
        .build()
}

/// Trim a response body to something fit for an error message.
pub fn body_excerpt(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() <= BODY_EXCERPT_LEN {
        return trimmed.to_string();
    }
    let cut: String = trimmed.chars().take(BODY_EXCERPT_LEN).collect();
    format!("{cut}…")
}

/// Render a reqwest error with its source chain, without the request URL.
///
/// The cloud URL carries the API key as a query parameter, so it must not
/// leak into user-facing text or logs.
pub fn describe(err: reqwest::Error) -> String {
    let err = err.without_url();
    let mut message = err.to_string();
    let mut source = std::error::Error::source(&err);
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
