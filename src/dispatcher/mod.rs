//! Backend selection and review routing.
//!
//! A [`Dispatcher`] fixes its backend once at construction and never
//! changes it. Every review builds one prompt and makes exactly one
//! adapter call; failures come back inside [`ReviewOutcome::Failed`].

use thiserror::Error;

use crate::config::ServiceConfig;
use crate::models::{BackendKind, ReviewOutcome, ReviewType, ValidationError, ensure_snippet};
use crate::prompts;
use crate::providers::http::describe;
use crate::providers::{CloudBackend, LocalBackend, ReviewBackend};

/// Why a dispatcher could not be built.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigurationError {
    #[error(
        "both backends are configured; set either the cloud API key and base URL \
         or the local model name and base URL, not both"
    )]
    BothConfigured,

    #[error(
        "no backend configured; set JARVIS_API_KEY and JARVIS_API_BASE_URL for the cloud \
         backend, or JARVIS_MODEL_NAME and JARVIS_LOCAL_BASE_URL for a local model"
    )]
    NoneConfigured,

    #[error("failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// The backend a configuration resolves to, with the settings it needs.
#[derive(Clone, PartialEq, Eq)]
pub enum BackendTarget {
    Cloud { api_key: String, base_url: String },
    Local { model: String, base_url: String },
}

impl BackendTarget {
    pub fn kind(&self) -> BackendKind {
        match self {
            BackendTarget::Cloud { .. } => BackendKind::Cloud,
            BackendTarget::Local { .. } => BackendKind::Local,
        }
    }
}

impl std::fmt::Debug for BackendTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BackendTarget::Cloud { base_url, .. } => f
                .debug_struct("Cloud")
                .field("api_key", &"[REDACTED]")
                .field("base_url", base_url)
                .finish(),
            BackendTarget::Local { model, base_url } => f
                .debug_struct("Local")
                .field("model", model)
                .field("base_url", base_url)
                .finish(),
        }
    }
}

/// Decide which backend `config` selects, without building anything.
///
/// A backend counts as configured only when both of its settings are
/// present and non-blank.
pub fn select_backend(config: &ServiceConfig) -> Result<BackendTarget, ConfigurationError> {
    match (config.cloud_settings(), config.local_settings()) {
        (Some(_), Some(_)) => Err(ConfigurationError::BothConfigured),
        (None, None) => Err(ConfigurationError::NoneConfigured),
        (Some((api_key, base_url)), None) => Ok(BackendTarget::Cloud {
            api_key: api_key.to_string(),
            base_url: base_url.to_string(),
        }),
        (None, Some((model, base_url))) => Ok(BackendTarget::Local {
            model: model.to_string(),
            base_url: base_url.to_string(),
        }),
    }
}

/// Routes reviews to the one backend selected at construction.
pub struct Dispatcher {
    kind: BackendKind,
    backend: Box<dyn ReviewBackend>,
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("kind", &self.kind)
            .field("backend", &self.backend.name())
            .finish()
    }
}

impl Dispatcher {
    /// Select a backend from `config` and build its adapter.
    pub fn initialize(config: &ServiceConfig) -> Result<Self, ConfigurationError> {
        let target = select_backend(config)?;
        let kind = target.kind();
        let timeout = config.request_timeout;

        let backend: Box<dyn ReviewBackend> = match target {
            BackendTarget::Cloud { api_key, base_url } => Box::new(
                CloudBackend::new(api_key, base_url, timeout)
                    .map_err(|e| ConfigurationError::HttpClient(describe(e)))?,
            ),
            BackendTarget::Local { model, base_url } => Box::new(
                LocalBackend::new(model, &base_url, timeout)
                    .map_err(|e| ConfigurationError::HttpClient(describe(e)))?,
            ),
        };

        tracing::debug!(backend = %kind, timeout_secs = timeout.as_secs(), "backend selected");
        Ok(Self { kind, backend })
    }

    /// Wrap an already-built adapter.
    pub fn with_backend(kind: BackendKind, backend: Box<dyn ReviewBackend>) -> Self {
        Self { kind, backend }
    }

    pub fn kind(&self) -> BackendKind {
        self.kind
    }

    /// Review `snippet` with the template for `review_type`.
    ///
    /// Empty or whitespace-only snippets are rejected before any network
    /// call. Backend failures are not errors here: they are returned as
    /// [`ReviewOutcome::Failed`].
    pub async fn review(
        &self,
        snippet: &str,
        review_type: ReviewType,
    ) -> Result<ReviewOutcome, ValidationError> {
        ensure_snippet(snippet)?;

        let prompt = prompts::build(snippet, review_type);
        tracing::debug!(
            backend = self.backend.name(),
            review_type = %review_type,
            prompt_len = prompt.len(),
            "dispatching review"
        );

        Ok(self.backend.complete(&prompt).await.into())
    }

    /// Like [`Dispatcher::review`], for an unparsed review-type tag.
    pub async fn review_tagged(
        &self,
        snippet: &str,
        tag: &str,
    ) -> Result<ReviewOutcome, ValidationError> {
        let review_type: ReviewType = tag.parse()?;
        self.review(snippet, review_type).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::BackendError;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records prompts and replays a fixed result.
    struct Recorder {
        reply: Result<String, BackendError>,
        prompts: Mutex<Vec<String>>,
    }

    impl Recorder {
        fn new(reply: Result<String, BackendError>) -> Self {
            Self {
                reply,
                prompts: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ReviewBackend for std::sync::Arc<Recorder> {
        fn name(&self) -> &'static str {
            "recorder"
        }

        async fn complete(&self, prompt: &str) -> Result<String, BackendError> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.reply.clone()
        }
    }

    fn cloud_config() -> ServiceConfig {
        ServiceConfig {
            cloud_api_key: Some("k".into()),
            cloud_base_url: Some("https://cloud.test/v1/generate".into()),
            ..ServiceConfig::default()
        }
    }

    fn local_config() -> ServiceConfig {
        ServiceConfig {
            local_model_name: Some("codellama".into()),
            local_base_url: Some("http://localhost:11434".into()),
            ..ServiceConfig::default()
        }
    }

    #[test]
    fn selects_cloud_when_only_cloud_configured() {
        let target = select_backend(&cloud_config()).unwrap();
        assert_eq!(target.kind(), BackendKind::Cloud);
        assert_eq!(
            target,
            BackendTarget::Cloud {
                api_key: "k".into(),
                base_url: "https://cloud.test/v1/generate".into()
            }
        );
    }

    #[test]
    fn selects_local_when_only_local_configured() {
        let target = select_backend(&local_config()).unwrap();
        assert_eq!(
            target,
            BackendTarget::Local {
                model: "codellama".into(),
                base_url: "http://localhost:11434".into()
            }
        );
    }

    #[test]
    fn both_configured_is_an_error() {
        let config = ServiceConfig {
            local_model_name: Some("codellama".into()),
            local_base_url: Some("http://localhost:11434".into()),
            ..cloud_config()
        };
        assert_eq!(select_backend(&config), Err(ConfigurationError::BothConfigured));
        assert!(matches!(
            Dispatcher::initialize(&config),
            Err(ConfigurationError::BothConfigured)
        ));
    }

    #[test]
    fn nothing_configured_is_an_error() {
        assert_eq!(
            select_backend(&ServiceConfig::default()),
            Err(ConfigurationError::NoneConfigured)
        );
    }

    #[test]
    fn half_configured_backend_does_not_count() {
        let config = ServiceConfig {
            cloud_api_key: Some("k".into()),
            local_model_name: Some("codellama".into()),
            ..ServiceConfig::default()
        };
        assert_eq!(select_backend(&config), Err(ConfigurationError::NoneConfigured));

        let config = ServiceConfig {
            cloud_base_url: Some("   ".into()),
            ..cloud_config()
        };
        assert_eq!(select_backend(&config), Err(ConfigurationError::NoneConfigured));
    }

    #[test]
    fn initialize_builds_the_selected_adapter() {
        let dispatcher = Dispatcher::initialize(&cloud_config()).unwrap();
        assert_eq!(dispatcher.kind(), BackendKind::Cloud);
        assert!(format!("{dispatcher:?}").contains("cloud"));

        let dispatcher = Dispatcher::initialize(&local_config()).unwrap();
        assert_eq!(dispatcher.kind(), BackendKind::Local);
    }

    #[test]
    fn target_debug_redacts_key() {
        let target = select_backend(&cloud_config()).unwrap();
        let rendered = format!("{target:?}");
        assert!(rendered.contains("[REDACTED]"));
        assert!(!rendered.contains("\"k\""));
    }

    #[tokio::test]
    async fn review_sends_built_prompt_once() {
        let recorder = std::sync::Arc::new(Recorder::new(Ok("x = 1  # PEP8: E225".into())));
        let dispatcher = Dispatcher::with_backend(BackendKind::Local, Box::new(recorder.clone()));

        let outcome = dispatcher.review("x=1", ReviewType::StyleSuggestions).await.unwrap();
        assert_eq!(outcome, ReviewOutcome::Reviewed("x = 1  # PEP8: E225".into()));

        let prompts = recorder.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(prompts[0], prompts::build("x=1", ReviewType::StyleSuggestions));
    }

    #[tokio::test]
    async fn backend_failure_becomes_failed_outcome() {
        let recorder = std::sync::Arc::new(Recorder::new(Err(BackendError::Timeout)));
        let dispatcher = Dispatcher::with_backend(BackendKind::Cloud, Box::new(recorder.clone()));

        let outcome = dispatcher.review("pass", ReviewType::BugDetection).await.unwrap();
        assert_eq!(outcome, ReviewOutcome::Failed(BackendError::Timeout));
        assert_eq!(outcome.text(), "cloud API call timed out");
    }

    #[tokio::test]
    async fn blank_snippet_never_reaches_backend() {
        let recorder = std::sync::Arc::new(Recorder::new(Ok("unused".into())));
        let dispatcher = Dispatcher::with_backend(BackendKind::Cloud, Box::new(recorder.clone()));

        assert_eq!(
            dispatcher.review("  \n", ReviewType::BugDetection).await,
            Err(ValidationError::EmptySnippet)
        );
        assert!(recorder.prompts.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn review_tagged_rejects_unknown_tag_before_calling() {
        let recorder = std::sync::Arc::new(Recorder::new(Ok("unused".into())));
        let dispatcher = Dispatcher::with_backend(BackendKind::Cloud, Box::new(recorder.clone()));

        assert!(matches!(
            dispatcher.review_tagged("x = 1", "lint").await,
            Err(ValidationError::UnknownReviewType(_))
        ));
        assert!(recorder.prompts.lock().unwrap().is_empty());

        let outcome = dispatcher.review_tagged("x = 1", "doc_strings_add").await.unwrap();
        assert!(outcome.is_reviewed());
    }
}
