//! ServiceConfig struct and loading logic.
//!
//! Each setting is read from its `JARVIS_*` variable first, then from a
//! provider-specific fallback where one exists. Missing values stay unset;
//! deciding whether the result is usable is the dispatcher's job.

use std::time::Duration;

use crate::constants::{
    DEFAULT_REQUEST_TIMEOUT, ENV_API_BASE_URL, ENV_API_KEY, ENV_GEMINI_API_BASE_URL,
    ENV_GEMINI_API_KEY, ENV_LOCAL_BASE_URL, ENV_MODEL_NAME, ENV_TIMEOUT_SECS,
};
use crate::env::Env;

/// Backend settings for one dispatcher.
#[derive(Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub cloud_api_key: Option<String>,
    pub cloud_base_url: Option<String>,
    pub local_model_name: Option<String>,
    pub local_base_url: Option<String>,
    pub request_timeout: Duration,
}

impl std::fmt::Debug for ServiceConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceConfig")
            .field("cloud_api_key", &self.cloud_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("cloud_base_url", &self.cloud_base_url)
            .field("local_model_name", &self.local_model_name)
            .field("local_base_url", &self.local_base_url)
            .field("request_timeout", &self.request_timeout)
            .finish()
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            cloud_api_key: None,
            cloud_base_url: None,
            local_model_name: None,
            local_base_url: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl ServiceConfig {
    /// Read all settings from `env`. Never fails.
    pub fn load(env: &Env) -> Self {
        let mut config = Self {
            cloud_api_key: env.first_non_empty(&[ENV_API_KEY, ENV_GEMINI_API_KEY]),
            cloud_base_url: env.first_non_empty(&[ENV_API_BASE_URL, ENV_GEMINI_API_BASE_URL]),
            local_model_name: env.non_empty(ENV_MODEL_NAME),
            local_base_url: env.non_empty(ENV_LOCAL_BASE_URL),
            ..Self::default()
        };

        if let Some(raw) = env.non_empty(ENV_TIMEOUT_SECS) {
            match raw.trim().parse::<u64>() {
                Ok(secs) if secs > 0 => config.request_timeout = Duration::from_secs(secs),
                _ => tracing::warn!(
                    value = %raw,
                    "ignoring invalid {ENV_TIMEOUT_SECS}; keeping {}s",
                    DEFAULT_REQUEST_TIMEOUT.as_secs()
                ),
            }
        }

        config
    }

    /// Cloud key and base URL, when both are present and non-blank.
    pub fn cloud_settings(&self) -> Option<(&str, &str)> {
        Some((present(&self.cloud_api_key)?, present(&self.cloud_base_url)?))
    }

    /// Local model name and base URL, when both are present and non-blank.
    pub fn local_settings(&self) -> Option<(&str, &str)> {
        Some((present(&self.local_model_name)?, present(&self.local_base_url)?))
    }
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.trim().is_empty())
}
