use std::time::Duration;
use thiserror::Error;

use crate::dalle_types::response::ErrorDetails;

/// Everything a client operation can fail with. Nothing is retried or
/// swallowed; each variant surfaces synchronously to the caller.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The transport was configured without an API key.
    #[error("empty api key")]
    MissingApiKey,
    /// The caller's token was already cancelled or past its deadline at
    /// operation entry; no network call was made.
    #[error("cancelled")]
    Cancelled,
    #[error("invalid url: {0}")]
    InvalidUrl(#[from] url::ParseError),
    /// The request body could not be serialized.
    #[error("encode error: {0}")]
    Encode(#[source] serde_json::Error),
    /// A response (or error) body could not be parsed as the expected
    /// JSON. Distinct from [`ClientError::Api`] so callers can tell "the
    /// service reported a problem" apart from "the response was
    /// unintelligible".
    #[error("decode error: {0}")]
    Decode(#[source] serde_json::Error),
    /// The network round trip itself failed; propagated unchanged.
    #[error("transport error: {0}")]
    Transport(#[source] TransportError),
    /// A non-200 response that parsed into the service's error shape.
    #[error("{details}")]
    Api { status: u16, details: ErrorDetails },
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::MissingCredentials => ClientError::MissingApiKey,
            other => ClientError::Transport(other),
        }
    }
}

#[derive(Debug, Error)]
pub enum TransportError {
    /// Refused before any send attempt.
    #[error("empty api key")]
    MissingCredentials,
    #[error("network: {0}")]
    Network(String),
    #[error("connect timeout after {0:?}")]
    ConnectTimeout(Duration),
    #[error("request timeout after {0:?}")]
    RequestTimeout(Duration),
    #[error("body read error: {0}")]
    BodyRead(String),
    #[error("other: {0}")]
    Other(String),
}
