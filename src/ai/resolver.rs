//! Completion-model discovery and selection.
//!
//! The provider's catalog is queried at most once per process: the first
//! caller runs discovery, concurrent callers await the same in-flight
//! query, and everyone afterwards gets the memoized identifier. Discovery
//! never fails outward - an unreachable catalog or an empty match falls
//! back to a fixed default.

use std::future::Future;

use anyhow::Result;
use tokio::sync::OnceCell;
use tracing::{debug, warn};

use crate::api::gemini::{GeminiClient, ModelDescriptor};

/// Identifier used when discovery fails or nothing suitable is listed.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Source of completion-model descriptors.
pub trait ModelCatalog: Send + Sync {
    fn list_models(&self) -> impl Future<Output = Result<Vec<ModelDescriptor>>> + Send;
}

impl ModelCatalog for GeminiClient {
    async fn list_models(&self) -> Result<Vec<ModelDescriptor>> {
        GeminiClient::list_models(self).await
    }
}

/// Single-flight, memoized model resolution.
pub struct ModelResolver<C: ModelCatalog> {
    catalog: C,
    resolved: OnceCell<String>,
}

impl<C: ModelCatalog> ModelResolver<C> {
    pub fn new(catalog: C) -> Self {
        Self {
            catalog,
            resolved: OnceCell::new(),
        }
    }

    /// Resolve the completion model for this process.
    ///
    /// The memoized result is never invalidated; a process restart is the
    /// only way to pick up catalog changes.
    pub async fn resolve(&self) -> &str {
        self.resolved
            .get_or_init(|| async {
                match self.catalog.list_models().await {
                    Ok(models) => match pick_model(&models) {
                        Some(model) => {
                            debug!(model = %model, "Selected completion model");
                            model
                        }
                        None => {
                            debug!(default = DEFAULT_MODEL, "No suitable model listed, using default");
                            DEFAULT_MODEL.to_string()
                        }
                    },
                    Err(error) => {
                        warn!(error = %error, "Model catalog query failed, using default");
                        DEFAULT_MODEL.to_string()
                    }
                }
            })
            .await
    }
}

/// First completion-capable entry from the stable families, in catalog
/// order. The completion URL wants the bare name, so the catalog's
/// `models/` prefix is stripped.
fn pick_model(models: &[ModelDescriptor]) -> Option<String> {
    models
        .iter()
        .find(|model| {
            model.supports_completion
                && (model.identifier.contains("flash") || model.identifier.contains("pro"))
        })
        .map(|model| {
            model
                .identifier
                .strip_prefix("models/")
                .unwrap_or(&model.identifier)
                .to_string()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn descriptor(identifier: &str, supports_completion: bool) -> ModelDescriptor {
        ModelDescriptor {
            identifier: identifier.to_string(),
            supports_completion,
        }
    }

    struct StubCatalog {
        calls: AtomicUsize,
        models: Result<Vec<ModelDescriptor>, String>,
    }

    impl StubCatalog {
        fn listing(models: Vec<ModelDescriptor>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                models: Ok(models),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                models: Err("catalog unreachable".to_string()),
            }
        }
    }

    impl ModelCatalog for StubCatalog {
        async fn list_models(&self) -> Result<Vec<ModelDescriptor>> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.models {
                Ok(models) => Ok(models.clone()),
                Err(message) => Err(anyhow::anyhow!("{message}")),
            }
        }
    }

    #[test]
    fn test_pick_first_allowed_completion_model() {
        let models = vec![
            descriptor("models/embedding-001", false),
            descriptor("models/aqa", true),
            descriptor("models/gemini-1.5-pro", true),
            descriptor("models/gemini-1.5-flash", true),
        ];
        // aqa supports completion but is outside the allowed families.
        assert_eq!(pick_model(&models).as_deref(), Some("gemini-1.5-pro"));
    }

    #[test]
    fn test_pick_requires_completion_support() {
        let models = vec![descriptor("models/gemini-1.5-flash", false)];
        assert_eq!(pick_model(&models), None);
    }

    #[test]
    fn test_pick_keeps_unprefixed_identifier() {
        let models = vec![descriptor("gemini-1.5-flash", true)];
        assert_eq!(pick_model(&models).as_deref(), Some("gemini-1.5-flash"));
    }

    #[tokio::test]
    async fn test_empty_catalog_falls_back_to_default() {
        let resolver = ModelResolver::new(StubCatalog::listing(Vec::new()));
        assert_eq!(resolver.resolve().await, DEFAULT_MODEL);
    }

    #[tokio::test]
    async fn test_catalog_failure_falls_back_to_default() {
        let resolver = ModelResolver::new(StubCatalog::failing());
        assert_eq!(resolver.resolve().await, DEFAULT_MODEL);
        // The failed discovery is memoized too; no retry storm.
        resolver.resolve().await;
        assert_eq!(resolver.catalog.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_resolution_queries_catalog_once() {
        let resolver = ModelResolver::new(StubCatalog::listing(vec![descriptor(
            "models/gemini-1.5-flash",
            true,
        )]));

        assert_eq!(resolver.resolve().await, "gemini-1.5-flash");
        assert_eq!(resolver.resolve().await, "gemini-1.5-flash");
        assert_eq!(resolver.catalog.calls.load(Ordering::SeqCst), 1);
    }
}
