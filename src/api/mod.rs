//! HTTP clients for the external services the dashboard syncs against.
//!
//! This module provides the `MarketClient` for the public chart endpoint
//! that backs the quotes feed, and the `GeminiClient` for the AI provider's
//! model catalog and completion endpoints.
//!
//! Neither upstream requires session state; the AI provider authenticates
//! with an API key passed as a query parameter.

pub mod error;
pub mod gemini;
pub mod market;

pub use error::{ErrorKind, MirrorError};
pub use gemini::{CompletionError, GeminiClient, ModelDescriptor};
pub use market::{parse_chart, MarketClient};
