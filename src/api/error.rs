use thiserror::Error;

/// Classification of an AI assistant failure, carried inside a degraded
/// response rather than raised to the caller.
///
/// Classification precedence, highest first: missing credential, quota,
/// provider-reported error, connectivity, empty completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The proxy has no API key configured.
    Config,
    /// The provider answered HTTP 429.
    QuotaExceeded,
    /// The provider answered a non-success status with its own message.
    Provider,
    /// Network-level failure, timeout, or an unexplained status.
    Connectivity,
    /// The provider answered success without any completion text.
    EmptyCompletion,
}

/// Failure writing to or reading from the backend mirror.
///
/// Mirror failures never abort a fetch pipeline; they are logged and the
/// pipeline continues with whatever data remains reachable.
#[derive(Error, Debug)]
pub enum MirrorError {
    #[error("mirror rejected record {key}: {reason}")]
    Rejected { key: String, reason: String },

    #[error("mirror unavailable: {0}")]
    Unavailable(String),
}
