//! App-wide constants.
//!
//! Centralises the tool name, environment variable names, and network
//! defaults so a rename only requires changing this file.

use std::time::Duration;

/// Display name of the tool (lowercase).
pub const APP_NAME: &str = "jarvis";

/// Crate version, baked in at compile time.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default report file written by the `batch` command.
pub const DEFAULT_BATCH_OUTPUT: &str = "jarvis_review_results.txt";

/// Request timeout applied to both backends unless overridden.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Path appended to the local base URL for chat completions.
pub const LOCAL_CHAT_PATH: &str = "/api/chat";

// ── Environment variable names ──────────────────────────────────────

pub const ENV_API_KEY: &str = "JARVIS_API_KEY";
pub const ENV_API_BASE_URL: &str = "JARVIS_API_BASE_URL";
pub const ENV_MODEL_NAME: &str = "JARVIS_MODEL_NAME";
pub const ENV_LOCAL_BASE_URL: &str = "JARVIS_LOCAL_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "JARVIS_TIMEOUT_SECS";
pub const ENV_LOG: &str = "JARVIS_LOG";

/// Provider-specific fallbacks for the cloud settings.
pub const ENV_GEMINI_API_KEY: &str = "GEMINI_API_KEY";
pub const ENV_GEMINI_API_BASE_URL: &str = "GEMINI_API_BASE_URL";
