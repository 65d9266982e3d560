//! Assembly of signed Hunyuan chat requests
//!
//! Sending the request is left to the caller; this module only produces the
//! body, endpoint and `Authorization` value.

use hunyuan_config::HunyuanConfig;
use jiff::Timestamp;
use secrecy::SecretString;
use url::Url;

use crate::error::LlmError;
use crate::protocol::{HunyuanMessage, HunyuanRequest};
use crate::sign::signature;
use crate::types::Message;

/// Path of the chat completions endpoint, relative to the API base
pub const COMPLETIONS_PATH: &str = "/hyllm/v1/chat/completions";

/// How long a signature stays valid when no expiry is given
const DEFAULT_EXPIRY_SECS: i64 = 24 * 60 * 60;

/// Per-call overrides of the configured request defaults
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    /// Sampling temperature
    pub temperature: Option<f64>,
    /// Nucleus sampling threshold
    pub top_p: Option<f64>,
    /// Whether to ask for a streamed response
    pub stream: Option<bool>,
    /// Query identifier
    pub query_id: Option<String>,
    /// Unix timestamp to sign with; defaults to now
    pub timestamp: Option<i64>,
    /// Unix timestamp the signature expires at; defaults to a day after `timestamp`
    pub expired: Option<i64>,
}

/// A request ready to be posted to Hunyuan
#[derive(Debug, Clone)]
pub struct SignedRequest {
    /// Endpoint to POST to
    pub url: Url,
    /// Value of the `Authorization` header
    pub authorization: String,
    /// JSON request body
    pub body: HunyuanRequest,
}

/// Hunyuan chat adapter holding credentials and request defaults
#[derive(Debug)]
pub struct HunyuanChat {
    app_id: String,
    secret_id: String,
    secret_key: SecretString,
    completions_url: Url,
    query_id: Option<String>,
    temperature: f64,
    top_p: f64,
    streaming: bool,
}

impl HunyuanChat {
    /// Create from configuration
    ///
    /// # Errors
    ///
    /// Returns `LlmError::InvalidUrl` if the completions URL cannot be built
    /// from the configured base.
    pub fn new(config: &HunyuanConfig) -> Result<Self, LlmError> {
        let base = config.api_base.as_str().trim_end_matches('/');
        let completions_url =
            Url::parse(&format!("{base}{COMPLETIONS_PATH}")).map_err(|e| LlmError::InvalidUrl(e.to_string()))?;

        Ok(Self {
            app_id: config.app_id.clone(),
            secret_id: config.secret_id.clone(),
            secret_key: config.secret_key.clone(),
            completions_url,
            query_id: config.query_id.clone(),
            temperature: config.temperature,
            top_p: config.top_p,
            streaming: config.streaming,
        })
    }

    /// Endpoint requests are signed for and sent to
    pub const fn completions_url(&self) -> &Url {
        &self.completions_url
    }

    /// Convert `messages`, fill in defaults, and sign the resulting request
    ///
    /// # Errors
    ///
    /// Returns `LlmError::UnsupportedRole` for the first message with no
    /// Hunyuan representation.
    pub fn build_request(&self, messages: &[Message], options: RequestOptions) -> Result<SignedRequest, LlmError> {
        let messages = messages
            .iter()
            .map(HunyuanMessage::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        let timestamp = options.timestamp.unwrap_or_else(|| Timestamp::now().as_second());
        let expired = options
            .expired
            .unwrap_or_else(|| timestamp.saturating_add(DEFAULT_EXPIRY_SECS));

        let body = HunyuanRequest {
            app_id: self.app_id.clone(),
            secret_id: self.secret_id.clone(),
            query_id: options.query_id.or_else(|| self.query_id.clone()),
            messages,
            temperature: options.temperature.unwrap_or(self.temperature),
            top_p: options.top_p.unwrap_or(self.top_p),
            stream: options.stream.unwrap_or(self.streaming),
            timestamp,
            expired,
        };

        let authorization = signature(&self.secret_key, &self.completions_url, &body);

        tracing::debug!(
            url = %self.completions_url,
            messages = body.messages.len(),
            stream = body.stream,
            "signed hunyuan request"
        );

        Ok(SignedRequest {
            url: self.completions_url.clone(),
            authorization,
            body,
        })
    }
}
