//! Wire client for the AI provider's generative-language API.
//!
//! Two endpoints are used: the model catalog (GET, key as query parameter)
//! and `generateContent` (POST). Failures of the completion call come back
//! as a structured [`CompletionError`] so the proxy can classify them
//! without re-inspecting HTTP details.

use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Constants
// ============================================================================

/// Base URL for the generative-language API.
const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Capability a model must advertise to serve completions.
const COMPLETION_METHOD: &str = "generateContent";

/// HTTP request timeout in seconds.
/// Catalog and completion calls are otherwise unbounded network operations;
/// 30s keeps the assistant responsive on a dead link.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// A catalog entry normalized to what model selection needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelDescriptor {
    pub identifier: String,
    pub supports_completion: bool,
}

/// Failure modes of a completion call, in classification order.
#[derive(Error, Debug)]
pub enum CompletionError {
    #[error("completion quota exceeded")]
    Quota,

    #[error("provider error: {message}")]
    Provider { message: String },

    #[error("unexpected status {0} without provider message")]
    Status(u16),

    #[error("network failure: {0}")]
    Network(#[from] reqwest::Error),

    #[error("response contained no completion text")]
    Empty,
}

/// Client for the AI provider.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
}

impl GeminiClient {
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self { client, api_key })
    }

    /// Query the provider's model catalog.
    ///
    /// Errors here are absorbed by the resolver's default-selection path;
    /// this method just reports them faithfully.
    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>> {
        let url = format!("{}/models?key={}", GEMINI_BASE_URL, self.api_key);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .context("Failed to query model catalog")?;

        let status = response.status();
        if !status.is_success() {
            anyhow::bail!("model catalog returned {}", status);
        }

        let catalog: ModelsResponse = response
            .json()
            .await
            .context("Failed to parse model catalog")?;

        Ok(catalog
            .models
            .into_iter()
            .filter_map(|model| {
                let identifier = model.name?;
                Some(ModelDescriptor {
                    supports_completion: model
                        .supported_generation_methods
                        .iter()
                        .any(|method| method == COMPLETION_METHOD),
                    identifier,
                })
            })
            .collect())
    }

    /// Issue a completion request against `model` and extract its text.
    ///
    /// `model` may carry the catalog's `models/` prefix; the URL form must
    /// not double it.
    pub async fn generate_content(
        &self,
        model: &str,
        prompt: &str,
    ) -> std::result::Result<String, CompletionError> {
        let model = model.strip_prefix("models/").unwrap_or(model);
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            GEMINI_BASE_URL, model, self.api_key
        );
        let body = serde_json::json!({
            "contents": [{ "parts": [{ "text": prompt }] }]
        });

        let response = self.client.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            if status.as_u16() == 429 {
                return Err(CompletionError::Quota);
            }
            let body = response.text().await.unwrap_or_default();
            return match provider_message(&body) {
                Some(message) => Err(CompletionError::Provider { message }),
                None => Err(CompletionError::Status(status.as_u16())),
            };
        }

        let body = response.text().await?;
        completion_text(&body).ok_or(CompletionError::Empty)
    }
}

// Wire types for the catalog response - internal only

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

#[derive(Debug, Deserialize)]
struct ModelInfo {
    name: Option<String>,
    #[serde(rename = "supportedGenerationMethods", default)]
    supported_generation_methods: Vec<String>,
}

/// Extract the provider's own message from a failure body, if present.
fn provider_message(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct ErrorBody {
        error: Option<ErrorDetail>,
    }

    #[derive(Deserialize)]
    struct ErrorDetail {
        message: Option<String>,
    }

    serde_json::from_str::<ErrorBody>(body)
        .ok()?
        .error?
        .message
        .filter(|message| !message.is_empty())
}

/// Extract the first candidate's completion text from a success body.
fn completion_text(body: &str) -> Option<String> {
    #[derive(Deserialize)]
    struct GenerateContentResponse {
        #[serde(default)]
        candidates: Vec<Candidate>,
    }

    #[derive(Deserialize)]
    struct Candidate {
        content: Option<CandidateContent>,
    }

    #[derive(Deserialize)]
    struct CandidateContent {
        #[serde(default)]
        parts: Vec<CandidatePart>,
    }

    #[derive(Deserialize)]
    struct CandidatePart {
        text: Option<String>,
    }

    let parsed: GenerateContentResponse = serde_json::from_str(body).ok()?;
    parsed
        .candidates
        .into_iter()
        .next()?
        .content?
        .parts
        .into_iter()
        .next()?
        .text
        .filter(|text| !text.is_empty())
}
