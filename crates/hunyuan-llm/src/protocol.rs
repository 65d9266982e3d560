//! Hunyuan chat completion API wire format types
//!
//! Pure serde structs matching the provider's JSON. They are only used at the
//! boundary and for request signing, never as the internal representation.

use serde::{Deserialize, Serialize};

// -- Request types --

/// Message within a Hunyuan request or response
///
/// Field order matters: the signer serializes this struct as-is.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunyuanMessage {
    /// Message role (`user` or `assistant`)
    pub role: String,
    /// Text content
    pub content: String,
}

/// Chat completion request body
///
/// This is also the signing payload; see [`crate::sign`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HunyuanRequest {
    /// Application ID
    pub app_id: String,
    /// Secret ID paired with the signing key
    pub secret_id: String,
    /// Caller-chosen query identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_id: Option<String>,
    /// Conversation messages
    pub messages: Vec<HunyuanMessage>,
    /// Sampling temperature
    pub temperature: f64,
    /// Nucleus sampling threshold
    pub top_p: f64,
    /// Whether to stream the response, sent as `1`/`0`
    #[serde(with = "int_flag")]
    pub stream: bool,
    /// Unix timestamp of the request
    pub timestamp: i64,
    /// Unix timestamp after which the signature is rejected
    pub expired: i64,
}

mod int_flag {
    use serde::{Deserialize, Deserializer, Serializer};

    #[allow(clippy::trivially_copy_pass_by_ref)]
    pub fn serialize<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(u8::from(*value))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
        Ok(u8::deserialize(deserializer)? != 0)
    }
}

// -- Response types --

/// Chat completion response, shared by complete and streamed bodies
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HunyuanResponse {
    /// Response identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Generated choices
    #[serde(default)]
    pub choices: Vec<HunyuanChoice>,
    /// Error envelope, present when the request failed
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<HunyuanErrorDetail>,
}

/// Choice within a response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HunyuanChoice {
    /// Why generation stopped
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
    /// Complete message (non-streamed responses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub messages: Option<HunyuanMessage>,
    /// Incremental fragment (streamed responses)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub delta: Option<HunyuanDelta>,
}

/// Incremental message fragment within a streamed choice
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HunyuanDelta {
    /// Role (usually only on the first fragment)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Incremental text content
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Error envelope embedded in a failed response
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HunyuanErrorDetail {
    /// Provider error code; zero means success
    #[serde(default)]
    pub code: i64,
    /// Human-readable error message
    #[serde(default)]
    pub message: String,
}
