//! AI assistant integration.
//!
//! This module provides the `ModelResolver` that discovers a usable
//! completion model once per process, and the `AiProxy` whose `complete`
//! call classifies every provider failure into a structured degraded
//! response instead of raising it.

pub mod proxy;
pub mod resolver;

pub use proxy::{AiProxy, AiRequest, AiResponse};
pub use resolver::{ModelCatalog, ModelResolver, DEFAULT_MODEL};
