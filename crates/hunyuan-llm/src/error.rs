use thiserror::Error;

use crate::types::MessageKind;

/// Errors that can occur while converting, signing, or decoding Hunyuan traffic
#[derive(Debug, Error)]
pub enum LlmError {
    /// Message variant has no Hunyuan wire representation
    #[error("got unknown message type: {kind}")]
    UnsupportedRole { kind: MessageKind },

    /// Hunyuan returned an error envelope
    #[error("hunyuan api error {code}: {message}")]
    Upstream { code: i64, message: String },

    /// Response body could not be decoded
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// Completions URL could not be built from the configured base
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl LlmError {
    /// Whether retrying the same request may succeed
    ///
    /// Only provider-side failures qualify; conversion and configuration
    /// errors fail identically on every attempt.
    pub const fn is_retryable(&self) -> bool {
        matches!(self, Self::Upstream { .. })
    }
}
