//! The AI assistant proxy.
//!
//! `complete` is the one entry point the chat layer calls, and it returns a
//! structured [`AiResponse`] under all conditions. Failures are classified
//! in a fixed precedence order - missing credential, quota, provider
//! message, connectivity, empty completion - and surface as degraded
//! responses with text a UI can show verbatim.
//!
//! On a successful completion the caller is expected to run
//! `InvalidationBus::invalidate_all`; the proxy itself does not touch the
//! feeds.

use tracing::{debug, warn};

use super::resolver::ModelResolver;
use crate::api::gemini::{CompletionError, GeminiClient};
use crate::api::ErrorKind;
use crate::config::Config;

// Degraded response texts, shown to the user as-is.

const MISSING_KEY_TEXT: &str =
    "The AI assistant is not configured: set GEMINI_API_KEY to enable it.";
const QUOTA_TEXT: &str =
    "The AI provider's quota is exhausted. The assistant is temporarily unavailable - please try again shortly.";
const CONNECTIVITY_TEXT: &str =
    "Unable to connect to the AI provider. Please check the network connection and API key.";
const EMPTY_TEXT: &str = "I couldn't generate a response. Please try again.";

/// A chat prompt; guaranteed non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiRequest {
    prompt: String,
}

impl AiRequest {
    /// Build a request, rejecting empty or whitespace-only prompts.
    pub fn new(prompt: impl Into<String>) -> Option<Self> {
        let prompt = prompt.into();
        let trimmed = prompt.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self {
                prompt: trimmed.to_string(),
            })
        }
    }

    pub fn prompt(&self) -> &str {
        &self.prompt
    }
}

/// Outcome of a completion call.
///
/// `degraded` responses carry the failure classification in `cause`; a
/// successful completion has `degraded == false` and no cause.
#[derive(Debug, Clone, PartialEq)]
pub struct AiResponse {
    pub text: String,
    pub degraded: bool,
    pub cause: Option<ErrorKind>,
}

impl AiResponse {
    fn succeeded(text: String) -> Self {
        Self {
            text,
            degraded: false,
            cause: None,
        }
    }

    fn degraded(cause: ErrorKind, text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            degraded: true,
            cause: Some(cause),
        }
    }
}

/// Completion proxy over the resolved model. Never fails visibly.
pub struct AiProxy {
    gateway: Option<Gateway>,
}

struct Gateway {
    client: GeminiClient,
    resolver: ModelResolver<GeminiClient>,
}

impl AiProxy {
    /// Build the proxy from configuration.
    ///
    /// A missing credential is not a construction error; it surfaces as a
    /// `Config`-classified degraded response on every call.
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let gateway = match &config.gemini_api_key {
            Some(key) => {
                let client = GeminiClient::new(key.clone())?;
                Some(Gateway {
                    resolver: ModelResolver::new(client.clone()),
                    client,
                })
            }
            None => None,
        };
        Ok(Self { gateway })
    }

    /// Run a completion for `request`. Returns under all conditions.
    pub async fn complete(&self, request: &AiRequest) -> AiResponse {
        let Some(gateway) = &self.gateway else {
            return AiResponse::degraded(ErrorKind::Config, MISSING_KEY_TEXT);
        };

        let model = gateway.resolver.resolve().await;
        match gateway
            .client
            .generate_content(model, request.prompt())
            .await
        {
            Ok(text) => {
                debug!(model, "Completion succeeded");
                AiResponse::succeeded(text)
            }
            Err(error) => {
                warn!(model, error = %error, "Completion failed");
                classify(error, model)
            }
        }
    }
}

/// Map a completion failure onto the response taxonomy.
fn classify(error: CompletionError, model: &str) -> AiResponse {
    match error {
        CompletionError::Quota => AiResponse::degraded(ErrorKind::QuotaExceeded, QUOTA_TEXT),
        CompletionError::Provider { message } => AiResponse::degraded(
            ErrorKind::Provider,
            format!("The AI provider reported an error: {message} (model: {model})"),
        ),
        CompletionError::Status(_) | CompletionError::Network(_) => {
            AiResponse::degraded(ErrorKind::Connectivity, CONNECTIVITY_TEXT)
        }
        CompletionError::Empty => AiResponse::degraded(ErrorKind::EmptyCompletion, EMPTY_TEXT),
    }
}
