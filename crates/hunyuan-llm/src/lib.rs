//! Tencent Hunyuan adapter for chat-model frameworks
//!
//! Converts framework messages to and from Hunyuan's wire format, signs
//! outbound requests with the vendor's HMAC-SHA1 scheme, and turns complete
//! or streamed responses back into messages and chunks. Transport is left to
//! the caller.

#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

pub mod convert;
pub mod error;
pub mod protocol;
pub mod request;
pub mod sign;
pub mod types;

pub use convert::{delta_to_chunk, response_to_messages, stream_line_to_chunk};
pub use error::LlmError;
pub use request::{HunyuanChat, RequestOptions, SignedRequest};
pub use sign::signature;
pub use types::{ChunkKind, Message, MessageChunk, MessageKind};
